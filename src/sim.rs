//! Simulated selector bank for hosts without GPIO.

use std::thread;
use std::time::Duration;

use log::{debug, info};
use selector_core::{Level, LogicPattern, Offset, PinId, SelectorDriver, GROUP_SIZE};

/// One hardware-level action taken by the simulated bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    Write(PinId, Level),
    Delay(u32),
    Pattern(Offset, LogicPattern),
}

/// [`SelectorDriver`] that logs every pin write instead of touching hardware.
///
/// Delays really sleep, so timing matches a hardware run. Every action is
/// kept in [`history`](Self::history) for inspection.
#[derive(Debug, Default)]
pub struct SimulatedDriver {
    selector_lines: [LogicPattern; GROUP_SIZE],
    control_lines: Vec<(PinId, Level)>,
    history: Vec<SimEvent>,
    initialized: bool,
    sleep: bool,
}

impl SimulatedDriver {
    /// Simulated bank whose delays sleep the calling thread.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sleep: true,
            ..Self::default()
        }
    }

    /// Simulated bank whose delays return immediately.
    #[must_use]
    pub fn instant() -> Self {
        Self::default()
    }

    /// Every action since creation, in order.
    #[must_use]
    pub fn history(&self) -> &[SimEvent] {
        &self.history
    }

    /// Current level of a control line; lines never written are low.
    #[must_use]
    pub fn level(&self, pin: PinId) -> Level {
        self.control_lines
            .iter()
            .find(|(id, _)| *id == pin)
            .map_or(Level::Low, |(_, level)| *level)
    }

    /// Pattern currently on the selector line pair for `offset`.
    #[must_use]
    pub fn selector_lines(&self, offset: Offset) -> LogicPattern {
        self.selector_lines[offset.get() as usize]
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl SelectorDriver for SimulatedDriver {
    fn init(&mut self) {
        info!("simulated selector bank: no GPIO is driven");
        self.initialized = true;
    }

    fn write_pin(&mut self, pin: PinId, level: Level) {
        debug!("setting {pin} to {level:?}");
        match self.control_lines.iter_mut().find(|(id, _)| *id == pin) {
            Some((_, current)) => *current = level,
            None => self.control_lines.push((pin, level)),
        }
        self.history.push(SimEvent::Write(pin, level));
    }

    fn delay_us(&mut self, us: u32) {
        if self.sleep {
            thread::sleep(Duration::from_micros(u64::from(us)));
        }
        self.history.push(SimEvent::Delay(us));
    }

    fn apply_pattern(&mut self, offset: Offset, pattern: LogicPattern) {
        debug!(
            "selector {}: line A = {}, line B = {}",
            offset.get(),
            u8::from(pattern.line_a()),
            u8::from(pattern.line_b())
        );
        self.selector_lines[offset.get() as usize] = pattern;
        self.history.push(SimEvent::Pattern(offset, pattern));
    }
}
