#![no_std]

//! Software-clocked driver for MBIA045 / MBI5042 RGB LED matrices.
//!
//! The chips are chained shift registers with internal grayscale PWM. This
//! crate bit-bangs their serial protocol over a handful of GPIO lines and
//! multiplexes the LED rows from a periodic timer interrupt.
//!
//! Architecture:
//! - `gamma` - CIE1931 intensity to grayscale lookup
//! - `frame_buffer` / `layout` - colors per logical LED and where each LED sits
//! - `encoder` / `row_buffer` - per-row bit-plane serial buffers
//! - `protocol` - DCLK/LE sequences understood by the chips
//! - `scheduler` - the row refresh state machine run from the timer interrupt
//! - `driver` - application-side handle and `init`
//!
//! The protocol engine is generic over [`LineDriver`] and the start-up
//! sequence over [`RefreshTimer`], so the crate is hardware agnostic.

pub mod command;
pub mod driver;
pub mod encoder;
pub mod error;
pub mod exchange;
pub mod frame_buffer;
pub mod gamma;
pub mod layout;
pub mod pins;
pub mod protocol;
pub mod row_buffer;
pub mod scheduler;

pub use command::Command;
pub use driver::{DEFAULT_REFRESH_RATE_HZ, Driver, DriverConfig, init};
pub use error::Error;
pub use exchange::FrameExchange;
pub use frame_buffer::{FrameBuffer, Rgb};
pub use gamma::GammaTable;
pub use layout::{LedLayout, LedPosition};
pub use pins::PinLines;
pub use protocol::{DataLine, Line, Mbia045};
pub use row_buffer::{BITS_PER_CHANNEL, RowBanks, RowBuffer, RowSet};
pub use scheduler::{RefreshPhase, RefreshScheduler};

pub use embassy_time::Duration;
pub use embedded_hal::digital::PinState;

/// Output line abstraction
///
/// Implement this trait to support different hardware platforms.
/// The protocol engine is generic over this trait.
pub trait LineDriver {
    /// Drive one line to a level
    fn set_line(&mut self, line: Line, level: PinState);

    /// Drive the three data lines from a packed serial word
    ///
    /// Override to write all three with a single port store.
    fn set_data(&mut self, word: u16) {
        for data in DataLine::ALL {
            self.set_line(Line::Data(data), PinState::from(word & data.mask() != 0));
        }
    }
}

/// Periodic timer behind the row refresh interrupt
pub trait RefreshTimer {
    /// Program the tick period without enabling the interrupt
    fn configure(&mut self, period: Duration);

    /// Unmask the refresh interrupt
    fn enable(&mut self);
}
