//! [`LineDriver`] over plain `embedded-hal` output pins.

use core::convert::Infallible;

use embedded_hal::digital::{OutputPin, PinState};

use crate::LineDriver;
use crate::protocol::{DataLine, Line};

/// One output pin per line.
///
/// Pins must be infallible: the refresh interrupt has nowhere to report a
/// failed write.
#[derive(Debug)]
pub struct PinLines<P, const ROWS: usize> {
    clock: P,
    latch: P,
    output_enable: P,
    red: P,
    green: P,
    blue: P,
    rows: [P; ROWS],
}

impl<P, const ROWS: usize> PinLines<P, ROWS>
where
    P: OutputPin<Error = Infallible>,
{
    /// `data` is ordered red, green, blue.
    pub fn new(clock: P, latch: P, output_enable: P, data: [P; 3], rows: [P; ROWS]) -> Self {
        let [red, green, blue] = data;
        Self {
            clock,
            latch,
            output_enable,
            red,
            green,
            blue,
            rows,
        }
    }

    fn pin(&mut self, line: Line) -> Option<&mut P> {
        Some(match line {
            Line::Clock => &mut self.clock,
            Line::Latch => &mut self.latch,
            Line::OutputEnable => &mut self.output_enable,
            Line::Data(DataLine::Red) => &mut self.red,
            Line::Data(DataLine::Green) => &mut self.green,
            Line::Data(DataLine::Blue) => &mut self.blue,
            Line::Row(row) => return self.rows.get_mut(usize::from(row)),
        })
    }
}

impl<P, const ROWS: usize> LineDriver for PinLines<P, ROWS>
where
    P: OutputPin<Error = Infallible>,
{
    fn set_line(&mut self, line: Line, level: PinState) {
        if let Some(pin) = self.pin(line) {
            let Ok(()) = pin.set_state(level);
        }
    }
}
