//! Pico pin map.

use heapless::Vec;
use selector_core::{LatchConfig, PinId, DEFAULT_SETTLE_US, GROUP_SIZE, NUM_GROUPS};

/// Selector A/B lines per offset.
pub const SELECTOR_PINS: [[u8; 2]; GROUP_SIZE] = [[2, 3], [4, 5], [6, 7], [10, 11]];

/// Latch-enable line per group.
pub const LATCH_PINS: [u8; NUM_GROUPS] = [12, 13, 14, 15];

pub const OUTPUT_ENABLE_PIN: u8 = 16;

/// Latch configuration matching the wiring above.
#[must_use]
pub fn latch_config() -> LatchConfig {
    let mut latch_pins = Vec::new();
    for pin in LATCH_PINS {
        // Capacity is NUM_GROUPS
        let _ = latch_pins.push(PinId(pin));
    }

    LatchConfig {
        latch_pins,
        output_enable: Some(PinId(OUTPUT_ENABLE_PIN)),
        settle_us: DEFAULT_SETTLE_US,
    }
}
