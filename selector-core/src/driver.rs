//! Hardware driver trait for the selector bank.

use crate::types::{LogicPattern, Offset};

/// Logic level on a control line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl From<bool> for Level {
    #[inline]
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Board-level identifier of a control line (BCM number on a Raspberry Pi,
/// GPIO number on an RP2040).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId(pub u8);

impl core::fmt::Display for PinId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "GPIO{}", self.0)
    }
}

/// Peripheral-control capability the latch sequencer drives.
///
/// Implementations wrap whatever GPIO layer the target has. Every operation
/// is fire-and-forget: there is no error return, and callers never retry.
///
/// `init` is called exactly once, before the first command cycle.
pub trait SelectorDriver {
    /// Configure pin directions and drive every line to a known state.
    fn init(&mut self);

    /// Drive a control line (latch-enable or output-enable) to `level`.
    fn write_pin(&mut self, pin: PinId, level: Level);

    /// Busy-wait for at least `us` microseconds.
    fn delay_us(&mut self, us: u32);

    /// Put `pattern` on the shared selector line pair for `offset`.
    fn apply_pattern(&mut self, offset: Offset, pattern: LogicPattern);
}

impl<T: SelectorDriver + ?Sized> SelectorDriver for &mut T {
    #[inline]
    fn init(&mut self) {
        (**self).init()
    }

    #[inline]
    fn write_pin(&mut self, pin: PinId, level: Level) {
        (**self).write_pin(pin, level)
    }

    #[inline]
    fn delay_us(&mut self, us: u32) {
        (**self).delay_us(us)
    }

    #[inline]
    fn apply_pattern(&mut self, offset: Offset, pattern: LogicPattern) {
        (**self).apply_pattern(offset, pattern)
    }
}
