//! Host side of the SP3T channel router.
//!
//! Wraps [`selector_core`] for the `sp3t-route` binary:
//!
//! - [`cli`]: Command-line arguments and hardware flags ([`Cli`])
//! - [`app`]: Command cycles and exit codes ([`run`])
//! - [`report`]: User-facing output lines
//! - [`sim`]: Simulated selector bank ([`SimulatedDriver`])
//!
//! # Re-exports
//!
//! All public items of [`selector_core`] are re-exported, so consumers only
//! need to depend on this crate.

pub mod app;
pub mod cli;
pub mod error;
pub mod report;
pub mod sim;

pub use app::{run, EXIT_FAILURE, EXIT_OK};
pub use cli::Cli;
pub use error::{ConfigError, RunError};
pub use selector_core::*;
pub use sim::{SimEvent, SimulatedDriver};
