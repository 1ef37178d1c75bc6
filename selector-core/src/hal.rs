//! [`SelectorDriver`] on top of `embedded-hal` output pins.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};
use heapless::Vec;
use log::warn;

use crate::driver::{Level, PinId, SelectorDriver};
use crate::types::{LogicPattern, Offset, GROUP_SIZE, NUM_GROUPS};

/// Latch-enable lines plus one output-enable line.
pub const MAX_CONTROL_LINES: usize = NUM_GROUPS + 1;

impl From<Level> for PinState {
    #[inline]
    fn from(level: Level) -> Self {
        match level {
            Level::Low => PinState::Low,
            Level::High => PinState::High,
        }
    }
}

/// Selector bank wired to plain GPIO outputs.
///
/// Owns one line pair per group offset (shared by all groups) and the
/// control lines addressed by [`PinId`]. Pin errors are dropped: the driver
/// contract is fire-and-forget.
pub struct HalDriver<P, D> {
    selectors: [[P; 2]; GROUP_SIZE],
    lines: Vec<(PinId, P), MAX_CONTROL_LINES>,
    delay: D,
}

impl<P: OutputPin, D: DelayNs> HalDriver<P, D> {
    /// Create a driver from the selector line pairs (`[line A, line B]` per offset).
    #[must_use]
    pub fn new(selectors: [[P; 2]; GROUP_SIZE], delay: D) -> Self {
        Self {
            selectors,
            lines: Vec::new(),
            delay,
        }
    }

    /// Register a control line under `id`.
    ///
    /// Returns the pin back if the table is full or `id` is already taken.
    pub fn add_line(&mut self, id: PinId, pin: P) -> Result<(), P> {
        if self.lines.iter().any(|(existing, _)| *existing == id) {
            return Err(pin);
        }
        self.lines.push((id, pin)).map_err(|(_, pin)| pin)
    }

    /// Builder form of [`add_line`](Self::add_line).
    pub fn with_line(mut self, id: PinId, pin: P) -> Result<Self, P> {
        self.add_line(id, pin)?;
        Ok(self)
    }

    /// Decompose into selector pins, control lines and delay.
    pub fn into_parts(self) -> ([[P; 2]; GROUP_SIZE], Vec<(PinId, P), MAX_CONTROL_LINES>, D) {
        (self.selectors, self.lines, self.delay)
    }
}

impl<P: OutputPin, D: DelayNs> SelectorDriver for HalDriver<P, D> {
    fn init(&mut self) {
        for pair in self.selectors.iter_mut() {
            for pin in pair.iter_mut() {
                let _ = pin.set_low();
            }
        }
        for (_, pin) in self.lines.iter_mut() {
            let _ = pin.set_low();
        }
    }

    fn write_pin(&mut self, id: PinId, level: Level) {
        match self.lines.iter_mut().find(|(line, _)| *line == id) {
            Some((_, pin)) => {
                let _ = pin.set_state(level.into());
            }
            None => warn!("write to unregistered {}", id),
        }
    }

    #[inline]
    fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }

    fn apply_pattern(&mut self, offset: Offset, pattern: LogicPattern) {
        let [a, b] = &mut self.selectors[offset.get() as usize];
        let _ = a.set_state(PinState::from(pattern.line_a()));
        let _ = b.set_state(PinState::from(pattern.line_b()));
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use core::convert::Infallible;
    use std::sync::{Arc, Mutex};
    use std::vec;
    use std::vec::Vec as StdVec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Event {
        Pin(&'static str, bool),
        Delay(u32),
    }

    type Log = Arc<Mutex<StdVec<Event>>>;

    struct MockPin {
        name: &'static str,
        log: Log,
    }

    impl embedded_hal::digital::ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.log.lock().unwrap().push(Event::Pin(self.name, false));
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.log.lock().unwrap().push(Event::Pin(self.name, true));
            Ok(())
        }
    }

    struct MockDelay {
        log: Log,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.log.lock().unwrap().push(Event::Delay(ns / 1000));
        }

        fn delay_us(&mut self, us: u32) {
            self.log.lock().unwrap().push(Event::Delay(us));
        }
    }

    const SELECTOR_NAMES: [[&str; 2]; GROUP_SIZE] =
        [["a0", "b0"], ["a1", "b1"], ["a2", "b2"], ["a3", "b3"]];

    fn driver(log: &Log) -> HalDriver<MockPin, MockDelay> {
        let selectors = SELECTOR_NAMES.map(|pair| {
            pair.map(|name| MockPin {
                name,
                log: log.clone(),
            })
        });
        HalDriver::new(selectors, MockDelay { log: log.clone() })
            .with_line(
                PinId(23),
                MockPin {
                    name: "le0",
                    log: log.clone(),
                },
            )
            .ok()
            .unwrap()
    }

    #[test]
    fn test_apply_pattern_drives_pair() {
        let log = Log::default();
        let mut d = driver(&log);
        d.apply_pattern(Offset::new(2).unwrap(), LogicPattern::from_lines(false, true));
        assert_eq!(
            *log.lock().unwrap(),
            vec![Event::Pin("a2", false), Event::Pin("b2", true)]
        );
    }

    #[test]
    fn test_write_pin_by_id() {
        let log = Log::default();
        let mut d = driver(&log);
        d.write_pin(PinId(23), Level::High);
        d.delay_us(3);
        d.write_pin(PinId(23), Level::Low);
        // Unknown ids are ignored
        d.write_pin(PinId(99), Level::High);
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                Event::Pin("le0", true),
                Event::Delay(3),
                Event::Pin("le0", false)
            ]
        );
    }

    #[test]
    fn test_init_drives_everything_low() {
        let log = Log::default();
        let mut d = driver(&log);
        d.init();
        let events = log.lock().unwrap();
        assert_eq!(events.len(), 2 * GROUP_SIZE + 1);
        assert!(events.iter().all(|e| matches!(e, Event::Pin(_, false))));
    }

    #[test]
    fn test_duplicate_line_rejected() {
        let log = Log::default();
        let mut d = driver(&log);
        let pin = MockPin {
            name: "dup",
            log: log.clone(),
        };
        assert!(d.add_line(PinId(23), pin).is_err());
    }

    #[test]
    fn test_line_table_capacity() {
        let log = Log::default();
        let mut d = driver(&log);
        for id in 0..(MAX_CONTROL_LINES as u8 - 1) {
            let pin = MockPin {
                name: "ctl",
                log: log.clone(),
            };
            assert!(d.add_line(PinId(id), pin).is_ok());
        }
        let pin = MockPin {
            name: "extra",
            log: log.clone(),
        };
        assert!(d.add_line(PinId(50), pin).is_err());
    }
}
