//! Bit-banged MBIA045 / MBI5042 serial protocol.
//!
//! The chips have no opcode field: they tell commands apart by how many DCLK
//! rising edges arrive while LE is high. Every sequence below is therefore a
//! fixed clock burst with LE raised on exact cycles.
//!
//! | Command                    | DCLK cycles | LE high on cycles |
//! |----------------------------|-------------|-------------------|
//! | Data latch (per channel)   | 16          | 15                |
//! | Global latch               | 16          | 13..=15           |
//! | PWM counter reset          | 16          | 3..=15            |
//! | Enable configuration write | 16          | 1..=15            |
//! | Write configuration        | 16          | 5..=15            |

use embedded_hal::digital::PinState;

use crate::LineDriver;
use crate::row_buffer::{BITS_PER_CHANNEL, RowBuffer};

/// Template OR'd with the current gain to build the configuration register.
pub const CONFIG_REGISTER_BASE: u16 = 0b1000_0100_0000_0000;

/// Gain used by `DriverConfig::default`.
pub const DEFAULT_CURRENT_GAIN: u8 = 0b00_0011;

/// The current gain is a 6-bit field.
pub const CURRENT_GAIN_MASK: u8 = 0b11_1111;

const CURRENT_GAIN_SHIFT: u16 = 4;

const DATA_LATCH_CYCLE: usize = BITS_PER_CHANNEL - 1;

const GLOBAL_LATCH_CYCLES: usize = 16;
const GLOBAL_LATCH_START: usize = 13;

const PWM_RESET_LEAD_CYCLES: usize = 3;
const PWM_RESET_LATCH_CYCLES: usize = 13;

const ENABLE_CONFIG_CYCLES: usize = 16;
const ENABLE_CONFIG_LATCH_START: usize = 1;

const CONFIG_DATA_LATCH_START: usize = 5;

/// Serial data input of one color's chip chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataLine {
    Red,
    Green,
    Blue,
}

impl DataLine {
    pub const ALL: [DataLine; 3] = [DataLine::Red, DataLine::Green, DataLine::Blue];

    /// Bit carrying this line inside a packed serial word.
    pub const fn bit(self) -> u16 {
        match self {
            DataLine::Red => 14,
            DataLine::Green => 13,
            DataLine::Blue => 12,
        }
    }

    pub const fn mask(self) -> u16 {
        1 << self.bit()
    }
}

/// Bits of a packed serial word that map to a data line.
pub const DATA_MASK: u16 =
    DataLine::Red.mask() | DataLine::Green.mask() | DataLine::Blue.mask();

/// Output lines the chip chain and the row switches hang off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Line {
    /// DCLK; data is sampled on the rising edge
    Clock,
    /// LE
    Latch,
    /// EN, active low
    OutputEnable,
    /// SDI of one color
    Data(DataLine),
    /// High side switch of one LED row, active high
    Row(u8),
}

/// Register value for a current gain; only the low 6 bits of `gain` count.
pub const fn config_register_value(gain: u8) -> u16 {
    (((gain & CURRENT_GAIN_MASK) as u16) << CURRENT_GAIN_SHIFT) | CONFIG_REGISTER_BASE
}

/// Protocol engine over a set of output lines.
#[derive(Debug)]
pub struct Mbia045<L: LineDriver> {
    lines: L,
}

impl<L: LineDriver> Mbia045<L> {
    pub const fn new(lines: L) -> Self {
        Self { lines }
    }

    pub const fn lines(&self) -> &L {
        &self.lines
    }

    pub fn lines_mut(&mut self) -> &mut L {
        &mut self.lines
    }

    pub fn release(self) -> L {
        self.lines
    }

    /// Shift one row of grayscale data into the chips.
    ///
    /// Channels go out last-first, each one MSB first, with a data latch on
    /// its final bit.
    pub fn shift_row<const COLS: usize>(&mut self, row: &RowBuffer<COLS>) {
        self.begin_burst();
        for planes in row.channels().iter().rev() {
            for (bit, &word) in planes.iter().enumerate() {
                self.lines.set_data(word);
                if bit == DATA_LATCH_CYCLE {
                    self.set_latch(PinState::High);
                }
                self.pulse_clock();
            }
            self.set_latch(PinState::Low);
        }
    }

    /// Move the shifted data of every channel into the PWM comparators.
    pub fn global_latch(&mut self) {
        self.begin_burst();
        for cycle in 0..GLOBAL_LATCH_CYCLES {
            if cycle == GLOBAL_LATCH_START {
                self.set_latch(PinState::High);
            }
            self.pulse_clock();
        }
        self.set_latch(PinState::Low);
    }

    /// Restart the chips' grayscale counters from zero.
    pub fn reset_pwm_counter(&mut self) {
        self.begin_burst();
        self.clock_cycles(PWM_RESET_LEAD_CYCLES);
        self.set_latch(PinState::High);
        self.clock_cycles(PWM_RESET_LATCH_CYCLES);
        self.set_latch(PinState::Low);
    }

    /// Write the configuration register of every chip in the chain.
    ///
    /// The enable burst has one lead cycle with LE low, so the chips see 15
    /// edges with LE high. All three data lines carry the same value, so the
    /// three color chains end up configured identically.
    pub fn write_config_register(&mut self, value: u16) {
        self.begin_burst();
        for cycle in 0..ENABLE_CONFIG_CYCLES {
            if cycle == ENABLE_CONFIG_LATCH_START {
                self.set_latch(PinState::High);
            }
            self.pulse_clock();
        }
        self.set_latch(PinState::Low);

        for bit in 0..BITS_PER_CHANNEL {
            let level = (value >> (BITS_PER_CHANNEL - 1 - bit)) & 1;
            self.lines.set_data(if level == 0 { 0 } else { DATA_MASK });
            if bit == CONFIG_DATA_LATCH_START {
                self.set_latch(PinState::High);
            }
            self.pulse_clock();
        }
        self.set_latch(PinState::Low);
    }

    pub fn set_current_gain(&mut self, gain: u8) {
        self.write_config_register(config_register_value(gain));
    }

    /// Drive EN; the chips sink current only while it is low.
    pub fn set_output_enabled(&mut self, enabled: bool) {
        let level = if enabled { PinState::Low } else { PinState::High };
        self.lines.set_line(Line::OutputEnable, level);
    }

    /// Switch off the first `rows` row lines.
    pub fn disable_rows(&mut self, rows: usize) {
        for row in 0..rows {
            let Ok(row) = u8::try_from(row) else {
                break;
            };
            self.lines.set_line(Line::Row(row), PinState::Low);
        }
    }

    /// Switch on one row line. Callers disable the others first.
    pub fn enable_row(&mut self, row: u8) {
        self.lines.set_line(Line::Row(row), PinState::High);
    }

    fn begin_burst(&mut self) {
        self.set_latch(PinState::Low);
        self.lines.set_line(Line::Clock, PinState::Low);
    }

    fn clock_cycles(&mut self, count: usize) {
        for _ in 0..count {
            self.pulse_clock();
        }
    }

    #[inline]
    fn pulse_clock(&mut self) {
        self.lines.set_line(Line::Clock, PinState::High);
        self.lines.set_line(Line::Clock, PinState::Low);
    }

    #[inline]
    fn set_latch(&mut self, level: PinState) {
        self.lines.set_line(Line::Latch, level);
    }
}
