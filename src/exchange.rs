//! State shared between the application and the refresh interrupt.
//!
//! Only two things cross the boundary: the published row bank (plus the
//! pending flag that says it has not been fully shown yet) and a
//! short queue of control commands. Both sit behind one `critical-section`
//! mutex, and banks move by swapping references, so no critical section
//! ever copies frame data.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::command::{COMMAND_QUEUE_SIZE, Command};
use crate::row_buffer::RowSet;

struct Exchange<'a, const ROWS: usize, const COLS: usize> {
    published: Option<&'a mut RowSet<ROWS, COLS>>,
    pending: bool,
    first_scan: bool,
    commands: Deque<Command, COMMAND_QUEUE_SIZE>,
}

/// Hand-off point between `Driver::flush` and `RefreshScheduler::tick`.
///
/// Can live in a `static`; `init` installs the published bank.
pub struct FrameExchange<'a, const ROWS: usize, const COLS: usize> {
    inner: Mutex<RefCell<Exchange<'a, ROWS, COLS>>>,
}

impl<'a, const ROWS: usize, const COLS: usize> FrameExchange<'a, ROWS, COLS> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Exchange {
                published: None,
                pending: false,
                first_scan: false,
                commands: Deque::new(),
            })),
        }
    }

    /// Install the initial published bank.
    ///
    /// Hands the bank back if one is already installed.
    pub(crate) fn install(
        &self,
        published: &'a mut RowSet<ROWS, COLS>,
    ) -> Result<(), &'a mut RowSet<ROWS, COLS>> {
        critical_section::with(|cs| {
            let mut exchange = self.inner.borrow(cs).borrow_mut();
            if exchange.published.is_some() {
                return Err(published);
            }
            exchange.published = Some(published);
            Ok(())
        })
    }

    /// Swap a freshly encoded bank in and mark it pending.
    ///
    /// `back` receives the previously published bank.
    pub(crate) fn publish(&self, back: &mut &'a mut RowSet<ROWS, COLS>) {
        critical_section::with(|cs| {
            let mut exchange = self.inner.borrow(cs).borrow_mut();
            if let Some(published) = exchange.published.as_mut() {
                core::mem::swap(back, published);
                exchange.pending = true;
            }
        });
    }

    /// Take the pending bank, if any, leaving `active` as the next spare.
    ///
    /// Returns whether a new frame was adopted.
    pub(crate) fn adopt(&self, active: &mut &'a mut RowSet<ROWS, COLS>) -> bool {
        critical_section::with(|cs| {
            let mut exchange = self.inner.borrow(cs).borrow_mut();
            if !exchange.pending {
                return false;
            }
            let Some(published) = exchange.published.as_mut() else {
                return false;
            };
            core::mem::swap(active, published);
            exchange.pending = false;
            exchange.first_scan = true;
            true
        })
    }

    /// Mark the end of a full scan of the active bank.
    pub(crate) fn complete_scan(&self) {
        critical_section::with(|cs| {
            self.inner.borrow(cs).borrow_mut().first_scan = false;
        });
    }

    /// Whether the last flushed frame has yet to be shown on every row.
    ///
    /// Stays set from `flush` until the scheduler finishes the first full
    /// scan of that frame.
    pub fn is_pending(&self) -> bool {
        critical_section::with(|cs| {
            let exchange = self.inner.borrow(cs).borrow();
            exchange.pending || exchange.first_scan
        })
    }

    /// Queue a command for the next refresh tick.
    ///
    /// Returns `Err(command)` if the queue is full.
    pub(crate) fn push_command(&self, command: Command) -> Result<(), Command> {
        critical_section::with(|cs| {
            let mut exchange = self.inner.borrow(cs).borrow_mut();
            exchange.commands.push_back(command)
        })
    }

    pub(crate) fn pop_command(&self) -> Option<Command> {
        critical_section::with(|cs| {
            let mut exchange = self.inner.borrow(cs).borrow_mut();
            exchange.commands.pop_front()
        })
    }
}

impl<const ROWS: usize, const COLS: usize> Default for FrameExchange<'_, ROWS, COLS> {
    fn default() -> Self {
        Self::new()
    }
}
