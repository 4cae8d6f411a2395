//! Application-side driver handle and the start-up sequence.

use embassy_time::Duration;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::command::Command;
use crate::encoder::encode_frame;
use crate::error::Error;
use crate::exchange::FrameExchange;
use crate::frame_buffer::{FrameBuffer, Rgb};
use crate::gamma::GammaTable;
use crate::layout::{self, LedLayout};
use crate::protocol::{CURRENT_GAIN_MASK, DEFAULT_CURRENT_GAIN, Mbia045};
use crate::row_buffer::{RowBanks, RowSet};
use crate::scheduler::RefreshScheduler;
use crate::{LineDriver, RefreshTimer};

/// Default row refresh rate. Five rows scan at ~360 Hz.
pub const DEFAULT_REFRESH_RATE_HZ: u32 = 1800;

/// Build-time driver settings
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Refresh ticks per second; each tick lights one row
    pub refresh_rate_hz: u32,
    /// 6-bit current gain written to the chips during init
    pub current_gain: u8,
    /// Intensity to grayscale curve
    pub gamma: GammaTable,
}

impl DriverConfig {
    /// Timer period for one row tick.
    pub fn tick_period(&self) -> Duration {
        Duration::from_hz(u64::from(self.refresh_rate_hz))
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            refresh_rate_hz: DEFAULT_REFRESH_RATE_HZ,
            current_gain: DEFAULT_CURRENT_GAIN,
            gamma: GammaTable::CIE1931,
        }
    }
}

/// Application-side half of the driver.
///
/// Collects colors, encodes them on [`flush`](Driver::flush) and queues
/// control commands for the refresh interrupt. Never touches the lines
/// itself.
pub struct Driver<'a, const LEDS: usize, const ROWS: usize, const COLS: usize> {
    frame: FrameBuffer<LEDS>,
    layout: &'a LedLayout<LEDS>,
    gamma: GammaTable,
    back: &'a mut RowSet<ROWS, COLS>,
    exchange: &'a FrameExchange<'a, ROWS, COLS>,
}

/// Bring the chips up and split the driver into its two halves.
///
/// In order: checks the configuration, programs the refresh timer, blanks all
/// row banks, switches the rows off and the chip outputs on, writes the
/// configuration register with `config.current_gain`, and finally enables
/// the timer interrupt. Fails without touching the timer or the lines if
/// the configuration is invalid or `exchange` was already used.
///
/// The returned [`RefreshScheduler`] belongs to the timer interrupt; keep the
/// [`Driver`] in normal context.
///
/// # Usage
///
/// ```ignore
/// static EXCHANGE: FrameExchange<'static, ROWS, COLS> = FrameExchange::new();
/// static BANKS: StaticCell<RowBanks<ROWS, COLS>> = StaticCell::new();
///
/// let lines = PinLines::new(dclk, le, en, [sdi_r, sdi_g, sdi_b], rows);
/// let (mut driver, scheduler) = mbia045_matrix::init(
///     &DriverConfig::default(),
///     &one_2_sf::LAYOUT,
///     BANKS.init(RowBanks::new()),
///     &EXCHANGE,
///     lines,
///     &mut timer,
/// )?;
/// // move `scheduler` to the timer interrupt, call `scheduler.tick()` there
///
/// driver.set_color_all(0, 0, 255);
/// driver.flush();
/// ```
#[allow(clippy::type_complexity)]
pub fn init<'a, L, T, const LEDS: usize, const ROWS: usize, const COLS: usize>(
    config: &DriverConfig,
    layout: &'a LedLayout<LEDS>,
    banks: &'a mut RowBanks<ROWS, COLS>,
    exchange: &'a FrameExchange<'a, ROWS, COLS>,
    lines: L,
    timer: &mut T,
) -> Result<(Driver<'a, LEDS, ROWS, COLS>, RefreshScheduler<'a, L, ROWS, COLS>), Error>
where
    L: LineDriver,
    T: RefreshTimer,
{
    if ROWS == 0 || ROWS > usize::from(u8::MAX) + 1 {
        return Err(Error::InvalidRowCount(ROWS));
    }
    if config.refresh_rate_hz == 0 {
        return Err(Error::InvalidRefreshRate(config.refresh_rate_hz));
    }
    layout::validate::<ROWS, COLS>(layout)?;

    banks.clear();
    let (back, published, active) = banks.split();
    exchange
        .install(published)
        .map_err(|_| Error::AlreadyInitialized)?;

    timer.configure(config.tick_period());

    let mut engine = Mbia045::new(lines);
    engine.disable_rows(ROWS);
    engine.set_output_enabled(true);
    engine.set_current_gain(config.current_gain);

    timer.enable();

    #[cfg(feature = "esp32-log")]
    println!(
        "[mbia045::init] {} LEDs on {} rows x {} channels, {} Hz, gain {:#08b}",
        LEDS,
        ROWS,
        COLS,
        config.refresh_rate_hz,
        config.current_gain & CURRENT_GAIN_MASK
    );

    let driver = Driver {
        frame: FrameBuffer::new(),
        layout,
        gamma: config.gamma.clone(),
        back,
        exchange,
    };
    Ok((driver, RefreshScheduler::new(engine, exchange, active)))
}

impl<'a, const LEDS: usize, const ROWS: usize, const COLS: usize> Driver<'a, LEDS, ROWS, COLS> {
    /// Set one LED; visible after the next [`flush`](Self::flush).
    pub fn set_color(&mut self, index: usize, r: u8, g: u8, b: u8) -> Result<(), Error> {
        if let Err(err) = self.frame.set(index, Rgb { r, g, b }) {
            #[cfg(feature = "esp32-log")]
            println!("[Driver.set_color] {}", err);
            return Err(err);
        }
        Ok(())
    }

    /// Set every LED; visible after the next [`flush`](Self::flush).
    pub fn set_color_all(&mut self, r: u8, g: u8, b: u8) {
        self.frame.fill(Rgb { r, g, b });
    }

    /// Encode the frame buffer and publish it to the refresh interrupt.
    ///
    /// Encoding happens in a bank the interrupt never reads; publishing is a
    /// reference swap inside a critical section. The scheduler picks the new
    /// frame up at the start of its next full scan; it counts as pending until
    /// that scan ends.
    pub fn flush(&mut self) {
        encode_frame(self.frame.colors(), self.layout, &self.gamma, self.back);
        self.exchange.publish(&mut self.back);
    }

    /// Queue a configuration register rewrite with a new current gain.
    ///
    /// Only the low 6 bits of `gain` are used.
    pub fn set_current_gain(&mut self, gain: u8) -> Result<(), Error> {
        self.send(Command::SetCurrentGain(gain & CURRENT_GAIN_MASK))
    }

    /// Queue switching the chip outputs on or off.
    pub fn set_output_enabled(&mut self, enabled: bool) -> Result<(), Error> {
        self.send(Command::SetOutputEnabled(enabled))
    }

    fn send(&self, command: Command) -> Result<(), Error> {
        #[cfg(feature = "esp32-log")]
        println!("[Driver.send] queueing {:?}", command);
        self.exchange
            .push_command(command)
            .map_err(Error::CommandQueueFull)
    }

    /// Whether the last flushed frame has not yet been shown on every row.
    ///
    /// Clears once the refresh interrupt completes a full scan of it.
    pub fn is_flush_pending(&self) -> bool {
        self.exchange.is_pending()
    }

    pub const fn frame(&self) -> &FrameBuffer<LEDS> {
        &self.frame
    }

    pub const fn layout(&self) -> &'a LedLayout<LEDS> {
        self.layout
    }
}
