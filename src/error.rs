//! Error types for the matrix driver

use core::fmt;

use crate::command::Command;
use crate::layout::LedPosition;

/// Error type for driver setup and the color API
///
/// The refresh interrupt path never produces one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// LED index is not below the LED count
    IndexOutOfRange { index: usize, len: usize },
    /// Layout entry points outside the row/column grid
    PositionOutOfRange { index: usize, position: LedPosition },
    /// Refresh rate of zero
    InvalidRefreshRate(u32),
    /// No rows, or more rows than row lines can be addressed
    InvalidRowCount(usize),
    /// The frame exchange already has a published bank
    AlreadyInitialized,
    /// Control command queue is full
    CommandQueueFull(Command),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IndexOutOfRange { index, len } => {
                write!(f, "LED index {} out of range (count {})", index, len)
            }
            Error::PositionOutOfRange { index, position } => write!(
                f,
                "LED {} mapped outside the matrix (row {}, col {})",
                index, position.row, position.col
            ),
            Error::InvalidRefreshRate(hz) => write!(f, "Invalid refresh rate: {} Hz", hz),
            Error::InvalidRowCount(rows) => write!(f, "Invalid row count: {}", rows),
            Error::AlreadyInitialized => write!(f, "Driver already initialized"),
            Error::CommandQueueFull(command) => {
                write!(f, "Command queue full, dropped {:?}", command)
            }
        }
    }
}

impl core::error::Error for Error {}
