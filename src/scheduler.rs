//! Row refresh state machine.
//!
//! Runs from the periodic timer interrupt. Each tick pushes one row of data
//! through the chips and lights that row; `ROWS` ticks make one full scan.
//! Nothing here blocks, allocates or waits: every phase is a fixed number of
//! line toggles.

use crate::LineDriver;
use crate::command::Command;
use crate::exchange::FrameExchange;
use crate::protocol::Mbia045;
use crate::row_buffer::RowSet;

/// Phases of one refresh tick, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPhase {
    /// Between ticks
    Idle,
    /// Blank all rows and shift the current row's data in
    TransferRow,
    /// Commit the shifted data to the PWM comparators
    GlobalLatch,
    /// Restart the grayscale counters
    ResetCounter,
    /// Light the transferred row and move the cursor on
    SelectNextRow,
}

/// Interrupt-side half of the driver.
///
/// Owns the protocol engine and the active row bank. Hook [`tick`] to the
/// refresh timer interrupt.
///
/// [`tick`]: RefreshScheduler::tick
pub struct RefreshScheduler<'a, L: LineDriver, const ROWS: usize, const COLS: usize> {
    engine: Mbia045<L>,
    exchange: &'a FrameExchange<'a, ROWS, COLS>,
    active: &'a mut RowSet<ROWS, COLS>,
    row: usize,
    phase: RefreshPhase,
}

impl<'a, L: LineDriver, const ROWS: usize, const COLS: usize>
    RefreshScheduler<'a, L, ROWS, COLS>
{
    pub(crate) fn new(
        engine: Mbia045<L>,
        exchange: &'a FrameExchange<'a, ROWS, COLS>,
        active: &'a mut RowSet<ROWS, COLS>,
    ) -> Self {
        Self {
            engine,
            exchange,
            active,
            row: 0,
            phase: RefreshPhase::Idle,
        }
    }

    /// Run one full refresh tick.
    ///
    /// Interrupt handler body. If a tick was left part way through by
    /// [`step`](Self::step), only its remaining phases run.
    pub fn tick(&mut self) {
        while self.step() != RefreshPhase::Idle {}
    }

    /// Execute the current phase and return the one that follows.
    ///
    /// From `Idle` this starts a new tick. Exposed so the phases can be
    /// interleaved with application code under test.
    pub fn step(&mut self) -> RefreshPhase {
        self.phase = match self.phase {
            RefreshPhase::Idle => {
                self.apply_commands();
                if self.row == 0 {
                    self.exchange.adopt(&mut self.active);
                }
                RefreshPhase::TransferRow
            }
            RefreshPhase::TransferRow => {
                self.engine.disable_rows(ROWS);
                if let Some(row) = self.active.get(self.row) {
                    self.engine.shift_row(row);
                }
                RefreshPhase::GlobalLatch
            }
            RefreshPhase::GlobalLatch => {
                self.engine.global_latch();
                RefreshPhase::ResetCounter
            }
            RefreshPhase::ResetCounter => {
                self.engine.reset_pwm_counter();
                RefreshPhase::SelectNextRow
            }
            RefreshPhase::SelectNextRow => {
                if let Ok(row) = u8::try_from(self.row) {
                    self.engine.enable_row(row);
                }
                self.row = (self.row + 1) % ROWS;
                if self.row == 0 {
                    self.exchange.complete_scan();
                }
                RefreshPhase::Idle
            }
        };
        self.phase
    }

    /// Run queued control commands. Only called between row transfers.
    fn apply_commands(&mut self) {
        while let Some(command) = self.exchange.pop_command() {
            match command {
                Command::SetCurrentGain(gain) => self.engine.set_current_gain(gain),
                Command::SetOutputEnabled(enabled) => self.engine.set_output_enabled(enabled),
            }
        }
    }

    /// Row the next tick transfers.
    pub const fn row(&self) -> usize {
        self.row
    }

    pub const fn phase(&self) -> RefreshPhase {
        self.phase
    }

    /// Row set currently being scanned out.
    pub fn active_rows(&self) -> &RowSet<ROWS, COLS> {
        self.active
    }

    pub const fn lines(&self) -> &L {
        self.engine.lines()
    }

    pub fn lines_mut(&mut self) -> &mut L {
        self.engine.lines_mut()
    }
}
