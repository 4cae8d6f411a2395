//! Per-LED color storage written by the application.
//!
//! Nothing here touches hardware; colors reach the chips only after the
//! driver encodes the buffer on `flush`.

use smart_leds::RGB8;

use crate::error::Error;

pub type Rgb = RGB8;

/// One RGB triple per logical LED.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer<const LEDS: usize> {
    colors: [Rgb; LEDS],
}

impl<const LEDS: usize> FrameBuffer<LEDS> {
    /// All LEDs off.
    pub const fn new() -> Self {
        Self {
            colors: [Rgb { r: 0, g: 0, b: 0 }; LEDS],
        }
    }

    /// Overwrite the color of one LED.
    ///
    /// Fails without writing anything when `index` is not below `LEDS`.
    pub fn set(&mut self, index: usize, color: Rgb) -> Result<(), Error> {
        let slot = self
            .colors
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len: LEDS })?;
        *slot = color;
        Ok(())
    }

    /// Set every LED to the same color.
    pub fn fill(&mut self, color: Rgb) {
        self.colors.fill(color);
    }

    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.colors.get(index).copied()
    }

    pub const fn colors(&self) -> &[Rgb; LEDS] {
        &self.colors
    }

    pub const fn len(&self) -> usize {
        LEDS
    }

    pub const fn is_empty(&self) -> bool {
        LEDS == 0
    }
}

impl<const LEDS: usize> Default for FrameBuffer<LEDS> {
    fn default() -> Self {
        Self::new()
    }
}
