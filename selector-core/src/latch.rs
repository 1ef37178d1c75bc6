//! Group latch sequencing.
//!
//! All selectors share four line pairs (one per group offset). A group only
//! captures the lines while its latch-enable is pulsed, so every touched
//! group gets all four offsets driven: new patterns for the channels in the
//! command, and the mirrored previous state for the rest.

use heapless::Vec;
use log::{debug, trace};

use crate::driver::{Level, PinId, SelectorDriver};
use crate::router::{logic_pattern, route, Route};
use crate::types::{
    Assignment, ChannelIndex, ChannelState, GroupIndex, Offset, Position, GROUP_SIZE, NUM_CHAN,
    NUM_GROUPS,
};

/// Default latch hold time. Selector data sheets call for a few microseconds.
pub const DEFAULT_SETTLE_US: u32 = 3;

/// Default latch-enable lines for groups 0 to 3.
pub const DEFAULT_LATCH_PINS: [PinId; NUM_GROUPS] = [PinId(23), PinId(24), PinId(25), PinId(27)];

/// Default output-enable line.
pub const DEFAULT_OUTPUT_ENABLE_PIN: PinId = PinId(22);

/// Default selector line pairs `[A, B]` for offsets 0 to 3.
pub const DEFAULT_SELECTOR_PINS: [[PinId; 2]; GROUP_SIZE] = [
    [PinId(5), PinId(6)],
    [PinId(12), PinId(13)],
    [PinId(16), PinId(17)],
    [PinId(19), PinId(26)],
];

/// Hardware description used by the sequencer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LatchConfig {
    /// Latch-enable line per group, indexed by group. Groups past the end
    /// of the table are unknown.
    pub latch_pins: Vec<PinId, NUM_GROUPS>,
    /// Line asserted for the duration of a pass, if wired.
    pub output_enable: Option<PinId>,
    /// Latch hold time in microseconds.
    pub settle_us: u32,
}

impl Default for LatchConfig {
    fn default() -> Self {
        Self {
            latch_pins: Vec::from_slice(&DEFAULT_LATCH_PINS).unwrap_or_default(),
            output_enable: Some(DEFAULT_OUTPUT_ENABLE_PIN),
            settle_us: DEFAULT_SETTLE_US,
        }
    }
}

impl LatchConfig {
    /// Latch-enable line for `group`, if the table has one.
    #[inline]
    #[must_use]
    pub fn latch_pin(&self, group: GroupIndex) -> Option<PinId> {
        self.latch_pins.get(group.get() as usize).copied()
    }
}

/// Fatal sequencing errors. Nothing is written to hardware when one occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequenceError {
    /// The latch-pin table has no entry for this group.
    #[error("no latch pin configured for group {}", .group.get())]
    UnknownGroup { group: GroupIndex },
}

/// What a sequencing pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LatchReport {
    /// Groups pulsed, in pulse order.
    pub groups: Vec<GroupIndex, NUM_GROUPS>,
    /// Channels whose target was in the batch.
    pub channels: usize,
}

/// Drives the per-group latch protocol and mirrors the hardware-visible state.
pub struct LatchSequencer<D> {
    driver: D,
    config: LatchConfig,
    state: ChannelState,
}

impl<D: SelectorDriver> LatchSequencer<D> {
    /// Take ownership of the driver and initialize it.
    ///
    /// This is the only place `init` is called. The mirror starts with every
    /// channel floating.
    pub fn new(mut driver: D, config: LatchConfig) -> Self {
        driver.init();
        debug!(
            "selector bank initialized: {} latch lines, settle {} us",
            config.latch_pins.len(),
            config.settle_us
        );
        Self {
            driver,
            config,
            state: ChannelState::floating(),
        }
    }

    /// Run one sequencing pass over a batch of routes.
    ///
    /// Groups are pulsed in ascending order, each exactly once. Groups with no
    /// route in the batch are never touched. When a channel appears more than
    /// once, the later route wins.
    pub fn apply(&mut self, routes: &[Route]) -> Result<LatchReport, SequenceError> {
        let mut pending = [[None::<Position>; GROUP_SIZE]; NUM_GROUPS];
        for route in routes {
            let group = &mut pending[route.group.get() as usize];
            group[route.offset.get() as usize] = Some(route.position);
        }

        // Resolve every latch line before driving anything
        let mut plan: Vec<(GroupIndex, PinId), NUM_GROUPS> = Vec::new();
        for group in GroupIndex::all() {
            if pending[group.get() as usize].iter().all(Option::is_none) {
                continue;
            }
            let pin = self
                .config
                .latch_pin(group)
                .ok_or(SequenceError::UnknownGroup { group })?;
            let _ = plan.push((group, pin));
        }

        let mut report = LatchReport {
            channels: pending.iter().flatten().filter(|p| p.is_some()).count(),
            ..LatchReport::default()
        };
        if plan.is_empty() {
            return Ok(report);
        }

        if let Some(oe) = self.config.output_enable {
            self.driver.write_pin(oe, Level::High);
        }

        for (group, pin) in plan {
            let targets = &pending[group.get() as usize];
            for offset in Offset::all() {
                let channel = ChannelIndex::from_parts(group, offset);
                let position = targets[offset.get() as usize].unwrap_or(self.state[channel]);
                self.driver.apply_pattern(offset, logic_pattern(position));
                self.state[channel] = position;
            }
            self.pulse(pin);
            trace!("latched group {} on {}", group.get(), pin);
            let _ = report.groups.push(group);
        }

        if let Some(oe) = self.config.output_enable {
            self.driver.write_pin(oe, Level::Low);
        }

        debug!(
            "pass complete: {} channels across {} groups",
            report.channels,
            report.groups.len()
        );
        Ok(report)
    }

    /// Drive every channel to [`Position::Floating`].
    pub fn float_all(&mut self) -> Result<LatchReport, SequenceError> {
        let routes: Vec<Route, NUM_CHAN> = ChannelIndex::all()
            .map(|channel| route(Assignment::new(channel, Position::Floating)))
            .collect();
        self.apply(&routes)
    }

    fn pulse(&mut self, pin: PinId) {
        self.driver.write_pin(pin, Level::High);
        self.driver.delay_us(self.config.settle_us);
        self.driver.write_pin(pin, Level::Low);
    }

    /// Hardware-visible position of every channel after the last pass.
    #[inline]
    #[must_use]
    pub fn state(&self) -> &ChannelState {
        &self.state
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &LatchConfig {
        &self.config
    }

    #[inline]
    pub fn driver(&self) -> &D {
        &self.driver
    }

    #[inline]
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Decompose the sequencer into its driver and configuration.
    pub fn into_parts(self) -> (D, LatchConfig) {
        (self.driver, self.config)
    }
}
