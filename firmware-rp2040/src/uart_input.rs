//! UART line reader for routing commands.
//!
//! Reads `\n`-terminated lines from UART1. A trailing `\r` is dropped.
//!
//! # Pins
//!
//! Uses UART1:
//! - GPIO 8: TX
//! - GPIO 9: RX

use embassy_rp::uart::{Async, Error as UartError, UartRx};
use heapless::String;
use selector_core::{LineError, MAX_COMMAND_LENGTH};

/// One received command, without its line ending.
pub type CommandLine = String<MAX_COMMAND_LENGTH>;

#[inline]
fn uart_error_to_line_error(e: UartError) -> LineError {
    match e {
        UartError::Framing => LineError::Framing,
        UartError::Overrun => LineError::Overrun,
        _ => LineError::Io,
    }
}

/// Reads routing commands from a UART receiver.
pub struct UartCommandSource<'d> {
    rx: UartRx<'d, Async>,
    buffer: heapless::Vec<u8, MAX_COMMAND_LENGTH>,
}

impl<'d> UartCommandSource<'d> {
    #[must_use]
    pub fn new(rx: UartRx<'d, Async>) -> Self {
        Self {
            rx,
            buffer: heapless::Vec::new(),
        }
    }

    /// Wait for the next command line.
    ///
    /// Empty lines are skipped. If a line exceeds the buffer capacity, the
    /// rest of it is discarded so the next read starts on a fresh line.
    pub async fn receive(&mut self) -> Result<CommandLine, LineError> {
        loop {
            self.read_line().await?;
            if self.buffer.last() == Some(&b'\r') {
                self.buffer.pop();
            }
            if self.buffer.is_empty() {
                continue;
            }

            let text = core::str::from_utf8(&self.buffer).map_err(|_| LineError::Encoding)?;
            let mut line = CommandLine::new();
            // Both are MAX_COMMAND_LENGTH bytes
            line.push_str(text).map_err(|_| LineError::TooLong {
                length: text.len(),
            })?;
            return Ok(line);
        }
    }

    async fn read_line(&mut self) -> Result<(), LineError> {
        self.buffer.clear();
        let mut byte = [0u8; 1];

        loop {
            self.rx
                .read(&mut byte)
                .await
                .map_err(uart_error_to_line_error)?;

            if byte[0] == b'\n' {
                return Ok(());
            }

            // A \r just past capacity still fits once stripped
            if self.buffer.is_full() && byte[0] == b'\r' {
                continue;
            }

            if self.buffer.push(byte[0]).is_err() {
                let mut length = self.buffer.len() + 1;
                loop {
                    self.rx
                        .read(&mut byte)
                        .await
                        .map_err(uart_error_to_line_error)?;
                    if byte[0] == b'\n' {
                        break;
                    }
                    if byte[0] != b'\r' {
                        length += 1;
                    }
                }
                return Err(LineError::TooLong { length });
            }
        }
    }
}
