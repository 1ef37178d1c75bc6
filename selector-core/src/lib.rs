//! Platform-agnostic SP3T channel routing: command decoding and latch sequencing.
//!
//! This crate turns a compact routing command into hardware updates for a
//! bank of 16 single-pole triple-throw selectors without any platform-specific
//! dependencies. It runs in embedded `no_std` environments and on the host.
//!
//! # Overview
//!
//! - [`symbol`]: Position symbols and hex channel digits ([`map_position_symbol`], [`decode_hex_digit`])
//! - [`decoder`]: Command parsing with per-token diagnostics ([`decode`], [`tokens`])
//! - [`router`]: Channel to group/offset/logic pattern ([`route`], [`logic_pattern`])
//! - [`driver`]: Hardware capability trait ([`SelectorDriver`])
//! - [`hal`]: [`SelectorDriver`] over `embedded-hal` pins ([`HalDriver`])
//! - [`latch`]: Per-group latch protocol ([`LatchSequencer`])
//! - [`controller`]: Complete command cycles ([`RoutingController`])
//! - [`line`]: Transport errors with operator-facing text ([`LineError`])
//! - [`report`]: Per-token output lines ([`TokenLine`](report::TokenLine))
//!
//! # Command Format
//!
//! ```text
//! S<channel><position>...
//! ```
//!
//! `channel` is one hex digit (`0`-`F`), `position` is one of:
//!
//! | Symbol | Position | Line A | Line B |
//! |--------|----------|--------|--------|
//! | `F`    | Floating | 0      | 0      |
//! | `C`    | Cathode  | 1      | 0      |
//! | `A`    | Anode    | 0      | 1      |
//! | `G`    | Ground   | 1      | 1      |
//!
//! Channels are grouped four to a latch-enable line. A command latches each
//! touched group exactly once, in ascending group order.
//!
//! # Example
//!
//! ```rust
//! use selector_core::{decode, route_targets, Position};
//!
//! let decoded = decode("S0C9G").unwrap();
//! let routes = route_targets(&decoded.targets());
//! assert_eq!(routes.len(), 2);
//! assert_eq!(routes[1].group.get(), 2);
//! assert_eq!(routes[1].position, Position::Ground);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod controller;
pub mod decoder;
pub mod driver;
pub mod hal;
pub mod latch;
pub mod line;
pub mod report;
pub mod router;
pub mod symbol;
pub mod types;

// Re-export main types at crate root
pub use controller::{Cycle, CycleError, RoutingController};
pub use decoder::{
    decode, strip_line_ending, tokens, CommandError, DecodedCommand, Token, TokenError, Tokens,
    COMMAND_PREFIX, MAX_COMMAND_LENGTH, MAX_TOKENS,
};
pub use driver::{Level, PinId, SelectorDriver};
pub use hal::HalDriver;
pub use line::LineError;
pub use latch::{
    LatchConfig, LatchReport, LatchSequencer, SequenceError, DEFAULT_LATCH_PINS,
    DEFAULT_OUTPUT_ENABLE_PIN, DEFAULT_SELECTOR_PINS, DEFAULT_SETTLE_US,
};
pub use router::{logic_pattern, route, route_targets, Route, RouteBatch};
pub use symbol::{decode_hex_digit, map_position_symbol};
pub use types::{
    Assignment, ChannelIndex, ChannelState, ChannelTargets, GroupIndex, LogicPattern, Offset,
    Position, GROUP_SIZE, NUM_CHAN, NUM_GROUPS,
};
