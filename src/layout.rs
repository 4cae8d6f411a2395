//! Logical LED index to physical (row, column) mapping.

use crate::error::Error;

/// Physical position of one RGB LED: the row line that powers it and the
/// driver channel its cathodes sink into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedPosition {
    pub row: u8,
    pub col: u8,
}

impl LedPosition {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

/// Static mapping table, indexed by logical LED.
pub type LedLayout<const LEDS: usize> = [LedPosition; LEDS];

/// Check that every entry fits inside a `ROWS` x `COLS` grid.
pub fn validate<const ROWS: usize, const COLS: usize>(
    layout: &[LedPosition],
) -> Result<(), Error> {
    for (index, position) in layout.iter().enumerate() {
        if usize::from(position.row) >= ROWS || usize::from(position.col) >= COLS {
            return Err(Error::PositionOutOfRange {
                index,
                position: *position,
            });
        }
    }
    Ok(())
}

/// Ducky One 2 SF (1967ST) board: three MBI5042 chips, one per color, 16
/// channels each, multiplexed over five rows.
pub mod one_2_sf {
    use super::{LedLayout, LedPosition};

    pub const ROWS: usize = 5;
    pub const COLS: usize = 16;
    pub const LED_COUNT: usize = 69;

    pub const LAYOUT: LedLayout<LED_COUNT> = [
        // Row 0
        LedPosition::new(0, 0),
        LedPosition::new(0, 1),
        LedPosition::new(0, 2),
        LedPosition::new(0, 3),
        LedPosition::new(0, 4),
        LedPosition::new(0, 5),
        LedPosition::new(0, 6),
        LedPosition::new(0, 7),
        LedPosition::new(0, 8),
        LedPosition::new(0, 9),
        LedPosition::new(0, 10),
        LedPosition::new(0, 11),
        LedPosition::new(0, 12),
        LedPosition::new(0, 13),
        LedPosition::new(0, 14),
        // Row 1
        LedPosition::new(1, 0),
        LedPosition::new(1, 1),
        LedPosition::new(1, 2),
        LedPosition::new(1, 3),
        LedPosition::new(1, 4),
        LedPosition::new(1, 5),
        LedPosition::new(1, 6),
        LedPosition::new(1, 7),
        LedPosition::new(1, 8),
        LedPosition::new(1, 9),
        LedPosition::new(1, 10),
        LedPosition::new(1, 11),
        LedPosition::new(1, 12),
        LedPosition::new(1, 13),
        LedPosition::new(1, 14),
        // Row 2
        LedPosition::new(2, 0),
        LedPosition::new(2, 1),
        LedPosition::new(2, 2),
        LedPosition::new(2, 3),
        LedPosition::new(2, 4),
        LedPosition::new(2, 5),
        LedPosition::new(2, 6),
        LedPosition::new(2, 7),
        LedPosition::new(2, 8),
        LedPosition::new(2, 9),
        LedPosition::new(2, 10),
        LedPosition::new(2, 11),
        LedPosition::new(2, 13),
        LedPosition::new(2, 14),
        // Row 3
        LedPosition::new(3, 0),
        LedPosition::new(3, 2),
        LedPosition::new(3, 3),
        LedPosition::new(3, 4),
        LedPosition::new(3, 5),
        LedPosition::new(3, 6),
        LedPosition::new(3, 7),
        LedPosition::new(3, 8),
        LedPosition::new(3, 9),
        LedPosition::new(3, 10),
        LedPosition::new(3, 11),
        LedPosition::new(3, 12),
        LedPosition::new(3, 13),
        // Row 4
        LedPosition::new(4, 0),
        LedPosition::new(4, 1),
        LedPosition::new(4, 2),
        LedPosition::new(4, 3),
        LedPosition::new(4, 5),
        LedPosition::new(4, 7),
        LedPosition::new(4, 9),
        LedPosition::new(4, 10),
        LedPosition::new(4, 11),
        LedPosition::new(4, 12),
        LedPosition::new(4, 13),
        LedPosition::new(4, 14),
    ];
}
