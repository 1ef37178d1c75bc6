//! Per-token report lines, shared by every front end.

use core::fmt;

use crate::decoder::Token;
use crate::types::Assignment;

/// One line of per-token output: the assignment, or the diagnostic.
///
/// ```
/// use selector_core::{decode, report::TokenLine};
///
/// let decoded = decode("S0FgG").unwrap();
/// let lines: Vec<String> = decoded.tokens().iter().map(|t| TokenLine(t).to_string()).collect();
/// assert_eq!(lines, ["Channel 1 mapped to position [0, 0]", "Invalid channel number: g"]);
/// ```
pub struct TokenLine<'a>(pub &'a Token);

impl fmt::Display for TokenLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Ok(assignment) => fmt::Display::fmt(&AssignmentLine(assignment), f),
            Err(diagnostic) => fmt::Display::fmt(diagnostic, f),
        }
    }
}

/// `Channel <n> mapped to position [<x>, <y>]`, with `n` one-based.
pub struct AssignmentLine<'a>(pub &'a Assignment);

impl fmt::Display for AssignmentLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x, y) = self.0.position.coords();
        write!(
            f,
            "Channel {} mapped to position [{}, {}]",
            self.0.channel.number(),
            x,
            y
        )
    }
}
