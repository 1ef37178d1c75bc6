//! Core routing types: Position, ChannelIndex, GroupIndex, Offset, Assignment, LogicPattern.

use core::ops::{Index, IndexMut};

/// Number of addressable channels in the selector bank.
pub const NUM_CHAN: usize = 16;

/// Channels sharing one latch-enable line.
pub const GROUP_SIZE: usize = 4;

/// Number of latch groups in the bank.
pub const NUM_GROUPS: usize = NUM_CHAN / GROUP_SIZE;

/// Throw position of an SP3T selector.
///
/// Each position is a 2D binary coordinate `(x, y)`:
///
/// | Symbol | Position   | Coordinate |
/// |--------|------------|------------|
/// | `F`    | Floating   | `(0, 0)`   |
/// | `C`    | Cathode    | `(1, 0)`   |
/// | `A`    | Anode      | `(0, 1)`   |
/// | `G`    | Ground     | `(1, 1)`   |
///
/// Unknown symbols have no `Position`; see [`map_position_symbol`](crate::map_position_symbol).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Position {
    /// Channel disconnected (power-on state).
    #[default]
    Floating,
    Cathode,
    Anode,
    Ground,
}

impl Position {
    /// All positions in symbol-table order.
    pub const ALL: [Position; 4] = [
        Position::Floating,
        Position::Cathode,
        Position::Anode,
        Position::Ground,
    ];

    /// The `(x, y)` logic coordinate of this position.
    #[inline]
    #[must_use]
    pub const fn coords(self) -> (u8, u8) {
        match self {
            Position::Floating => (0, 0),
            Position::Cathode => (1, 0),
            Position::Anode => (0, 1),
            Position::Ground => (1, 1),
        }
    }

    /// The command symbol for this position.
    #[inline]
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Position::Floating => 'F',
            Position::Cathode => 'C',
            Position::Anode => 'A',
            Position::Ground => 'G',
        }
    }
}

/// Validated channel number in `0..NUM_CHAN`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelIndex(u8);

impl ChannelIndex {
    /// Returns `None` if `index` is not below [`NUM_CHAN`].
    #[inline]
    #[must_use]
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < NUM_CHAN {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Zero-based index.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// One-based channel number, as printed to users.
    #[inline]
    #[must_use]
    pub const fn number(self) -> u8 {
        self.0 + 1
    }

    /// Latch group this channel belongs to.
    #[inline]
    #[must_use]
    pub const fn group(self) -> GroupIndex {
        GroupIndex(self.0 / GROUP_SIZE as u8)
    }

    /// Position of this channel within its group.
    #[inline]
    #[must_use]
    pub const fn offset(self) -> Offset {
        Offset(self.0 % GROUP_SIZE as u8)
    }

    /// Rebuild a channel from its group and offset.
    #[inline]
    #[must_use]
    pub const fn from_parts(group: GroupIndex, offset: Offset) -> Self {
        Self(group.0 * GROUP_SIZE as u8 + offset.0)
    }

    /// Iterate over every channel in ascending order.
    pub fn all() -> impl Iterator<Item = ChannelIndex> {
        (0..NUM_CHAN as u8).map(ChannelIndex)
    }
}

/// Validated latch group number in `0..NUM_GROUPS`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GroupIndex(u8);

impl GroupIndex {
    #[inline]
    #[must_use]
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < NUM_GROUPS {
            Some(Self(index))
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Iterate over every group in ascending order.
    pub fn all() -> impl Iterator<Item = GroupIndex> {
        (0..NUM_GROUPS as u8).map(GroupIndex)
    }

    /// Channels belonging to this group, ascending.
    pub fn channels(self) -> impl Iterator<Item = ChannelIndex> {
        Offset::all().map(move |offset| ChannelIndex::from_parts(self, offset))
    }
}

/// Validated position of a channel inside its group, in `0..GROUP_SIZE`.
///
/// The offset also selects which pair of shared selector lines carries the
/// channel's logic pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Offset(u8);

impl Offset {
    #[inline]
    #[must_use]
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < GROUP_SIZE {
            Some(Self(index))
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = Offset> {
        (0..GROUP_SIZE as u8).map(Offset)
    }
}

/// A decoded request to move one channel to one position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Assignment {
    pub channel: ChannelIndex,
    pub position: Position,
}

impl Assignment {
    #[inline]
    #[must_use]
    pub const fn new(channel: ChannelIndex, position: Position) -> Self {
        Self { channel, position }
    }
}

/// Two-bit control code for an SP3T selector.
///
/// Bit 0 drives selector line A, bit 1 drives selector line B.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LogicPattern(u8);

impl LogicPattern {
    /// Build a pattern from the two control line states.
    #[inline]
    #[must_use]
    pub const fn from_lines(a: bool, b: bool) -> Self {
        Self((a as u8) | ((b as u8) << 1))
    }

    /// Raw two-bit value.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// State of selector line A.
    #[inline]
    #[must_use]
    pub const fn line_a(self) -> bool {
        self.0 & 0b01 != 0
    }

    /// State of selector line B.
    #[inline]
    #[must_use]
    pub const fn line_b(self) -> bool {
        self.0 & 0b10 != 0
    }
}

/// Hardware-visible position of every channel in the bank.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelState([Position; NUM_CHAN]);

impl ChannelState {
    /// All channels floating.
    #[must_use]
    pub const fn floating() -> Self {
        Self([Position::Floating; NUM_CHAN])
    }

    /// Iterate over `(channel, position)` pairs in ascending channel order.
    pub fn iter(&self) -> impl Iterator<Item = (ChannelIndex, Position)> + '_ {
        ChannelIndex::all().map(move |channel| (channel, self[channel]))
    }
}

impl Index<ChannelIndex> for ChannelState {
    type Output = Position;

    #[inline]
    fn index(&self, channel: ChannelIndex) -> &Position {
        &self.0[channel.get() as usize]
    }
}

impl IndexMut<ChannelIndex> for ChannelState {
    #[inline]
    fn index_mut(&mut self, channel: ChannelIndex) -> &mut Position {
        &mut self.0[channel.get() as usize]
    }
}

/// Per-channel targets requested by one command.
///
/// Rebuilt from scratch for every decoded command. Channels the command does
/// not mention are `None`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelTargets([Option<Position>; NUM_CHAN]);

impl ChannelTargets {
    #[must_use]
    pub const fn new() -> Self {
        Self([None; NUM_CHAN])
    }

    /// Record a target; a later call for the same channel replaces it.
    #[inline]
    pub fn set(&mut self, channel: ChannelIndex, position: Position) {
        self.0[channel.get() as usize] = Some(position);
    }

    #[inline]
    #[must_use]
    pub fn get(&self, channel: ChannelIndex) -> Option<Position> {
        self.0[channel.get() as usize]
    }

    /// Number of channels with a target.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.iter().filter(|target| target.is_some()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }

    /// Channels with a target, ascending.
    pub fn iter(&self) -> impl Iterator<Item = Assignment> + '_ {
        ChannelIndex::all()
            .filter_map(move |channel| self.get(channel).map(|pos| Assignment::new(channel, pos)))
    }
}

impl FromIterator<Assignment> for ChannelTargets {
    fn from_iter<T: IntoIterator<Item = Assignment>>(iter: T) -> Self {
        let mut targets = Self::new();
        for assignment in iter {
            targets.set(assignment.channel, assignment.position);
        }
        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_and_offset() {
        let ch = ChannelIndex::new(9).unwrap();
        assert_eq!(ch.group().get(), 2);
        assert_eq!(ch.offset().get(), 1);
        assert_eq!(ch.number(), 10);
        assert_eq!(ChannelIndex::from_parts(ch.group(), ch.offset()), ch);
    }

    #[test]
    fn test_channel_bounds() {
        assert!(ChannelIndex::new(15).is_some());
        assert!(ChannelIndex::new(16).is_none());
        assert!(GroupIndex::new(4).is_none());
        assert!(Offset::new(4).is_none());
    }

    #[test]
    fn test_every_group_has_four_channels() {
        for group in GroupIndex::all() {
            let mut count = 0;
            for channel in group.channels() {
                assert_eq!(channel.group(), group);
                count += 1;
            }
            assert_eq!(count, GROUP_SIZE);
        }
    }

    #[test]
    fn test_coords_are_distinct_binary() {
        for (i, a) in Position::ALL.iter().enumerate() {
            let (x, y) = a.coords();
            assert!(x <= 1 && y <= 1);
            for b in &Position::ALL[i + 1..] {
                assert_ne!(a.coords(), b.coords());
            }
        }
    }

    #[test]
    fn test_logic_pattern_lines() {
        let p = LogicPattern::from_lines(true, false);
        assert!(p.line_a());
        assert!(!p.line_b());
        assert_eq!(p.bits(), 0b01);
        assert_eq!(LogicPattern::from_lines(true, true).bits(), 0b11);
    }

    #[test]
    fn test_targets_last_write_wins() {
        let ch = ChannelIndex::new(3).unwrap();
        let targets: ChannelTargets = [
            Assignment::new(ch, Position::Anode),
            Assignment::new(ch, Position::Ground),
        ]
        .into_iter()
        .collect();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets.get(ch), Some(Position::Ground));
    }

    #[test]
    fn test_state_starts_floating() {
        let state = ChannelState::floating();
        assert!(state.iter().all(|(_, pos)| pos == Position::Floating));
        assert_eq!(state, ChannelState::default());
    }
}
