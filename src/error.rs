//! Host-side error types.

use std::io;

use selector_core::NUM_GROUPS;

/// Hardware flags that cannot form a latch configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{given} latch pins given, the bank has {} groups", NUM_GROUPS)]
    TooManyLatchPins { given: usize },
}

/// Errors that end a run before any command completes.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("invalid hardware configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
