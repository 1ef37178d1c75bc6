//! UART-commanded SP3T selector router for RP2040.
//!
//! The firmware runs on a Raspberry Pi Pico (RP2040) and:
//! 1. Receives routing commands over UART (115200 baud, 8N1), one per line
//! 2. Decodes them and latches the touched selector groups
//! 3. Echoes one report line per token back over UART TX
//!
//! # Hardware Configuration
//!
//! | Function        | GPIO   | Description |
//! |-----------------|--------|-------------|
//! | UART1 TX        | 8      | Report lines |
//! | UART1 RX        | 9      | Command input |
//! | Selector A/B 0  | 2, 3   | Offset 0 of every group |
//! | Selector A/B 1  | 4, 5   | Offset 1 of every group |
//! | Selector A/B 2  | 6, 7   | Offset 2 of every group |
//! | Selector A/B 3  | 10, 11 | Offset 3 of every group |
//! | Latch enable    | 12-15  | Groups 0-3 |
//! | Output enable   | 16     | High while a command is latched |
//! | LED             | 25     | Toggles on rejected lines |
//!
//! The Pico does not break out GPIO 23, 24 or 27 next to each other, so the
//! board map differs from the Raspberry Pi header defaults in [`selector_core`].
//!
//! # Architecture
//!
//! Two Embassy tasks share a bounded [`Channel`](embassy_sync::channel::Channel):
//!
//! - **Input Task**: Reads UART lines into [`CommandLine`] buffers
//! - **Router Task**: Owns the [`RoutingController`], latches and replies
//!
//! Unlike sensor state, commands are never coalesced: every line is applied in
//! arrival order.
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)

#![no_std]

pub use selector_core::{
    decode, CommandError, CycleError, DecodedCommand, HalDriver, LatchConfig, LineError, PinId,
    RoutingController, SequenceError, MAX_COMMAND_LENGTH,
};

pub mod board;
pub mod uart_input;

pub use board::latch_config;
pub use uart_input::{CommandLine, UartCommandSource};
