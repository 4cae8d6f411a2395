#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, OutputPin};
use mbia045_matrix::{
    Driver, DriverConfig, Duration, FrameExchange, LedLayout, LedPosition, Line, LineDriver,
    PinState, RefreshScheduler, RefreshTimer, RowBanks, init,
};

pub const ROWS: usize = 3;
pub const COLS: usize = 4;
pub const LEDS: usize = 6;

/// Small matrix with one unmapped channel per row.
pub const LAYOUT: LedLayout<LEDS> = [
    LedPosition::new(0, 0),
    LedPosition::new(0, 3),
    LedPosition::new(1, 1),
    LedPosition::new(1, 2),
    LedPosition::new(2, 0),
    LedPosition::new(2, 3),
];

/// Clock cycles in one refresh tick: row data, global latch, counter reset.
pub const TICK_CYCLES: usize = COLS * 16 + 16 + 16;

/// One `set_line` call as seen by the recorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub line: Line,
    pub level: PinState,
    pub ordinal: usize,
}

#[derive(Default)]
struct TraceState {
    events: Vec<Event>,
    next_ordinal: usize,
}

/// Shared view of everything a [`Recorder`] saw.
#[derive(Clone, Default)]
pub struct Trace(Rc<RefCell<TraceState>>);

impl Trace {
    pub fn len(&self) -> usize {
        self.0.borrow().events.len()
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().events.clone()
    }

    /// Drain recorded events; ordinals keep counting.
    pub fn take(&self) -> Vec<Event> {
        std::mem::take(&mut self.0.borrow_mut().events)
    }
}

/// `LineDriver` that records every call.
#[derive(Clone, Default)]
pub struct Recorder {
    trace: Trace,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trace(&self) -> Trace {
        self.trace.clone()
    }
}

impl LineDriver for Recorder {
    fn set_line(&mut self, line: Line, level: PinState) {
        let mut state = self.trace.0.borrow_mut();
        let ordinal = state.next_ordinal;
        state.next_ordinal += 1;
        state.events.push(Event {
            line,
            level,
            ordinal,
        });
    }
}

/// Line state sampled on a DCLK rising edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cycle {
    pub latch: bool,
    pub data: u16,
}

/// Turn events into clock cycles. Lines start low.
pub fn cycles(events: &[Event]) -> Vec<Cycle> {
    let mut latch = false;
    let mut data = 0u16;
    let mut out = Vec::new();
    for event in events {
        let high = event.level == PinState::High;
        match event.line {
            Line::Latch => latch = high,
            Line::Data(line) if high => data |= line.mask(),
            Line::Data(line) => data &= !line.mask(),
            Line::Clock if high => out.push(Cycle { latch, data }),
            _ => {}
        }
    }
    out
}

/// Events without ordinals, for comparing two runs.
pub fn signals(events: &[Event]) -> Vec<(Line, PinState)> {
    events.iter().map(|event| (event.line, event.level)).collect()
}

/// Rows switched on, in order.
pub fn rows_enabled(events: &[Event]) -> Vec<u8> {
    events
        .iter()
        .filter_map(|event| match (event.line, event.level) {
            (Line::Row(row), PinState::High) => Some(row),
            _ => None,
        })
        .collect()
}

/// Records when the driver touched the timer, relative to line events.
pub struct MockTimer {
    trace: Trace,
    pub period: Option<Duration>,
    pub configured_at: Option<usize>,
    pub enabled_at: Option<usize>,
}

impl MockTimer {
    pub fn new(trace: &Trace) -> Self {
        Self {
            trace: trace.clone(),
            period: None,
            configured_at: None,
            enabled_at: None,
        }
    }
}

impl RefreshTimer for MockTimer {
    fn configure(&mut self, period: Duration) {
        self.period = Some(period);
        self.configured_at = Some(self.trace.len());
    }

    fn enable(&mut self) {
        self.enabled_at = Some(self.trace.len());
    }
}

/// Output pin writing `(name, level)` pairs into a shared log.
pub struct MockPin {
    name: &'static str,
    log: Rc<RefCell<Vec<(&'static str, PinState)>>>,
}

impl MockPin {
    pub fn new(name: &'static str, log: &Rc<RefCell<Vec<(&'static str, PinState)>>>) -> Self {
        Self {
            name,
            log: log.clone(),
        }
    }
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.log.borrow_mut().push((self.name, PinState::Low));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.log.borrow_mut().push((self.name, PinState::High));
        Ok(())
    }
}

/// Init the small test matrix with default settings, dropping init events.
pub fn start<'a>(
    banks: &'a mut RowBanks<ROWS, COLS>,
    exchange: &'a FrameExchange<'a, ROWS, COLS>,
) -> (
    Driver<'a, LEDS, ROWS, COLS>,
    RefreshScheduler<'a, Recorder, ROWS, COLS>,
    Trace,
) {
    let recorder = Recorder::new();
    let trace = recorder.trace();
    let mut timer = MockTimer::new(&trace);
    let (driver, scheduler) = init(
        &DriverConfig::default(),
        &LAYOUT,
        banks,
        exchange,
        recorder,
        &mut timer,
    )
    .unwrap();
    trace.take();
    (driver, scheduler, trace)
}
