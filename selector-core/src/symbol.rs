//! Single-character symbol tables for the routing command.

use crate::types::Position;

/// Map a position symbol to its [`Position`].
///
/// Symbols are case-sensitive: `F`, `C`, `A` and `G`. Anything else is
/// unmapped and returns `None`.
#[inline]
#[must_use]
pub const fn map_position_symbol(c: char) -> Option<Position> {
    match c {
        'F' => Some(Position::Floating),
        'C' => Some(Position::Cathode),
        'A' => Some(Position::Anode),
        'G' => Some(Position::Ground),
        _ => None,
    }
}

/// Decode a single hex digit (either case) to its value.
#[inline]
#[must_use]
pub const fn decode_hex_digit(c: char) -> Option<u8> {
    match c {
        '0'..='9' => Some(c as u8 - b'0'),
        'a'..='f' => Some(c as u8 - b'a' + 10),
        'A'..='F' => Some(c as u8 - b'A' + 10),
        _ => None,
    }
}
