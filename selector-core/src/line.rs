//! Errors from line-oriented command transports.

use crate::decoder::MAX_COMMAND_LENGTH;

/// Reasons a command line could not be delivered.
///
/// The `Display` text is what a front end sends back to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// UART framing error.
    #[error("Receive error: framing")]
    Framing,
    /// Receiver overrun, bytes were lost.
    #[error("Receive error: overrun")]
    Overrun,
    /// Line longer than the receive buffer; the rest was discarded.
    #[error("Input exceeds {} characters ({length})", MAX_COMMAND_LENGTH)]
    TooLong { length: usize },
    /// Line is not valid UTF-8.
    #[error("Input is not valid UTF-8")]
    Encoding,
    /// Any other transport failure.
    #[error("Receive error")]
    Io,
}
