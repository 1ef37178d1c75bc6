//! Channel router: turns an assignment into a device-level instruction.

use heapless::Vec;

use crate::types::{
    Assignment, ChannelIndex, ChannelTargets, GroupIndex, LogicPattern, Offset, Position, NUM_CHAN,
};

/// Selector truth table, indexed by `(x, y)` coordinate.
///
/// | Position | x | y | line A | line B |
/// |----------|---|---|--------|--------|
/// | Floating | 0 | 0 | 0      | 0      |
/// | Cathode  | 1 | 0 | 1      | 0      |
/// | Anode    | 0 | 1 | 0      | 1      |
/// | Ground   | 1 | 1 | 1      | 1      |
#[inline]
#[must_use]
pub const fn logic_pattern(position: Position) -> LogicPattern {
    let (x, y) = position.coords();
    LogicPattern::from_lines(x == 1, y == 1)
}

/// Instruction for one selector: which latch group, which line pair, what pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Route {
    pub channel: ChannelIndex,
    pub group: GroupIndex,
    pub offset: Offset,
    pub position: Position,
    pub pattern: LogicPattern,
}

/// Routes produced for one command cycle, at most one per channel.
pub type RouteBatch = Vec<Route, NUM_CHAN>;

/// Route a single assignment.
#[inline]
#[must_use]
pub fn route(assignment: Assignment) -> Route {
    let Assignment { channel, position } = assignment;
    Route {
        channel,
        group: channel.group(),
        offset: channel.offset(),
        position,
        pattern: logic_pattern(position),
    }
}

/// Route every target of a command, in ascending channel order.
#[must_use]
pub fn route_targets(targets: &ChannelTargets) -> RouteBatch {
    let mut batch = RouteBatch::new();
    for assignment in targets.iter() {
        // At most NUM_CHAN targets exist, so the batch never fills up
        let _ = batch.push(route(assignment));
    }
    batch
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ch(i: u8) -> ChannelIndex {
        ChannelIndex::new(i).unwrap()
    }

    #[test]
    fn test_truth_table() {
        assert_eq!(logic_pattern(Position::Floating).bits(), 0b00);
        assert_eq!(logic_pattern(Position::Cathode).bits(), 0b01);
        assert_eq!(logic_pattern(Position::Anode).bits(), 0b10);
        assert_eq!(logic_pattern(Position::Ground).bits(), 0b11);
    }

    #[test]
    fn test_pattern_lines_follow_coords() {
        for pos in Position::ALL {
            let (x, y) = pos.coords();
            let pattern = logic_pattern(pos);
            assert_eq!(pattern.line_a(), x == 1);
            assert_eq!(pattern.line_b(), y == 1);
        }
    }

    #[test]
    fn test_route_group_and_offset() {
        let r = route(Assignment::new(ch(13), Position::Cathode));
        assert_eq!(r.group.get(), 3);
        assert_eq!(r.offset.get(), 1);
        assert_eq!(r.pattern, logic_pattern(Position::Cathode));
        assert_eq!(r.channel, ch(13));
    }

    #[test]
    fn test_route_targets_ascending() {
        let targets: ChannelTargets = [
            Assignment::new(ch(9), Position::Ground),
            Assignment::new(ch(2), Position::Anode),
            Assignment::new(ch(9), Position::Cathode),
        ]
        .into_iter()
        .collect();

        let batch = route_targets(&targets);
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].channel, ch(2));
        assert_eq!(batch[1].channel, ch(9));
        assert_eq!(batch[1].position, Position::Cathode);
    }
}
