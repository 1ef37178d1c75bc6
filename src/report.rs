//! User-facing output lines.

use selector_core::{ChannelState, CommandError};

pub use selector_core::report::{AssignmentLine, TokenLine};

/// Usage line printed when no command is given.
#[must_use]
pub fn usage(program: &str) -> String {
    format!("Usage: {program} <S followed by nvnv pairs>")
}

/// Line printed when a command is rejected as a whole.
#[must_use]
pub fn rejection(err: &CommandError) -> String {
    err.to_string()
}

/// One `Channel <n>: <symbol> [<x>, <y>]` line per channel.
pub fn status_lines(state: &ChannelState) -> impl Iterator<Item = String> + '_ {
    state.iter().map(|(channel, position)| {
        let (x, y) = position.coords();
        format!(
            "Channel {}: {} [{}, {}]",
            channel.number(),
            position.symbol(),
            x,
            y
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use selector_core::{ChannelIndex, Position};

    #[test]
    fn test_usage() {
        assert_eq!(usage("route"), "Usage: route <S followed by nvnv pairs>");
    }

    #[test]
    fn test_rejection() {
        assert_eq!(
            rejection(&CommandError::Malformed { found: 'x' }),
            "Input must start with 'S'"
        );
        assert_eq!(rejection(&CommandError::Empty), "Input must start with 'S'");
    }

    #[test]
    fn test_status_lines() {
        let mut state = ChannelState::floating();
        state[ChannelIndex::new(4).unwrap()] = Position::Anode;
        let lines: Vec<_> = status_lines(&state).collect();
        assert_eq!(lines.len(), 16);
        assert_eq!(lines[0], "Channel 1: F [0, 0]");
        assert_eq!(lines[4], "Channel 5: A [0, 1]");
    }
}
