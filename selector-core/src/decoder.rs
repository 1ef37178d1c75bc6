//! Routing command decoder.
//!
//! Command format:
//!
//! ```text
//! S<channel><position><channel><position>...
//! ```
//!
//! - `S` - Command prefix (case-sensitive)
//! - `channel` - One hex digit, `0`-`F` (either case)
//! - `position` - One of `F`, `C`, `A`, `G`
//!
//! Bad tokens are reported and skipped; they never fail the whole command.
//! A trailing unpaired character is dropped without a diagnostic.

use heapless::Vec;

use crate::symbol::{decode_hex_digit, map_position_symbol};
use crate::types::{Assignment, ChannelIndex, ChannelTargets};

/// Leading character of every routing command.
pub const COMMAND_PREFIX: char = 'S';

/// Maximum number of tokens [`decode`] will store.
pub const MAX_TOKENS: usize = 32;

/// Longest command accepted by [`decode`]: prefix, tokens, and one dangling character.
pub const MAX_COMMAND_LENGTH: usize = 2 + 2 * MAX_TOKENS;

/// Errors that reject a whole command before any token is looked at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// No characters at all.
    #[error("Input must start with 'S'")]
    Empty,
    /// First character is not [`COMMAND_PREFIX`].
    #[error("Input must start with 'S'")]
    Malformed { found: char },
    /// More than [`MAX_COMMAND_LENGTH`] characters.
    #[error("Input exceeds {} characters ({length})", MAX_COMMAND_LENGTH)]
    TooLong { length: usize },
}

/// Per-token diagnostic. The token is skipped and decoding continues.
///
/// `index` is the character position of the offending symbol in the command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TokenError {
    #[error("Invalid channel number: {symbol}")]
    InvalidChannel { index: usize, symbol: char },
    #[error("Invalid position value: {symbol}")]
    InvalidPosition {
        index: usize,
        channel: ChannelIndex,
        symbol: char,
    },
}

impl TokenError {
    /// The character that caused the diagnostic.
    #[inline]
    #[must_use]
    pub const fn symbol(&self) -> char {
        match *self {
            TokenError::InvalidChannel { symbol, .. } => symbol,
            TokenError::InvalidPosition { symbol, .. } => symbol,
        }
    }
}

/// Outcome of decoding one two-character token.
pub type Token = Result<Assignment, TokenError>;

/// Lazy iterator over the tokens of a command. Unbounded.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    chars: core::iter::Skip<core::iter::Enumerate<core::str::Chars<'a>>>,
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let (channel_index, channel_symbol) = self.chars.next()?;
        // An unpaired trailing character never forms a token
        let (position_index, position_symbol) = self.chars.next()?;

        Some(decode_token(
            channel_index,
            channel_symbol,
            position_index,
            position_symbol,
        ))
    }
}

#[inline]
fn decode_token(
    channel_index: usize,
    channel_symbol: char,
    position_index: usize,
    position_symbol: char,
) -> Token {
    let channel = decode_hex_digit(channel_symbol)
        .and_then(ChannelIndex::new)
        .ok_or(TokenError::InvalidChannel {
            index: channel_index,
            symbol: channel_symbol,
        })?;

    let position = map_position_symbol(position_symbol).ok_or(TokenError::InvalidPosition {
        index: position_index,
        channel,
        symbol: position_symbol,
    })?;

    Ok(Assignment::new(channel, position))
}

/// Check the command prefix and return a lazy token iterator.
pub fn tokens(command: &str) -> Result<Tokens<'_>, CommandError> {
    match command.chars().next() {
        None => return Err(CommandError::Empty),
        Some(COMMAND_PREFIX) => {}
        Some(found) => return Err(CommandError::Malformed { found }),
    }

    Ok(Tokens {
        chars: command.chars().enumerate().skip(1),
    })
}

/// Decode a whole command into a fixed-capacity token list.
///
/// # Example
///
/// ```
/// use selector_core::{decode, Position};
///
/// let decoded = decode("S0FgG1A").unwrap();
/// let valid: Vec<_> = decoded.assignments().map(|a| (a.channel.get(), a.position)).collect();
/// assert_eq!(valid, [(0, Position::Floating), (1, Position::Anode)]);
/// assert_eq!(decoded.diagnostics().count(), 1);
/// ```
pub fn decode(command: &str) -> Result<DecodedCommand, CommandError> {
    let length = command.chars().count();
    if length > MAX_COMMAND_LENGTH {
        return Err(CommandError::TooLong { length });
    }

    let mut decoded = DecodedCommand::default();
    for token in tokens(command)? {
        decoded
            .tokens
            .push(token)
            .map_err(|_| CommandError::TooLong { length })?;
    }
    Ok(decoded)
}

/// Strip trailing CR and/or LF from a line.
#[inline]
#[must_use]
pub fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Decoded command: every complete token in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedCommand {
    tokens: Vec<Token, MAX_TOKENS>,
}

impl DecodedCommand {
    /// All tokens, valid or not, in input order.
    #[inline]
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Valid assignments in input order.
    pub fn assignments(&self) -> impl Iterator<Item = Assignment> + '_ {
        self.tokens.iter().filter_map(|token| token.ok())
    }

    /// Diagnostics in input order.
    pub fn diagnostics(&self) -> impl Iterator<Item = TokenError> + '_ {
        self.tokens.iter().filter_map(|token| token.err())
    }

    /// Per-channel targets; the last assignment for a channel wins.
    #[must_use]
    pub fn targets(&self) -> ChannelTargets {
        self.assignments().collect()
    }
}
