//! RoutingController: connects the command decoder to the latch sequencer.

use crate::decoder::{decode, CommandError, DecodedCommand};
use crate::driver::SelectorDriver;
use crate::latch::{LatchConfig, LatchReport, LatchSequencer, SequenceError};
use crate::router::route_targets;
use crate::types::{ChannelState, ChannelTargets};

/// Runs complete command cycles: decode, route, latch.
///
/// Every cycle takes `&mut self`, so two commands can never interleave their
/// latch passes. Callers with several command sources share one controller
/// behind a single writer (a mutex or one owning task).
pub struct RoutingController<D> {
    sequencer: LatchSequencer<D>,
}

/// Result of a complete cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    pub decoded: DecodedCommand,
    pub latched: LatchReport,
}

/// Errors that stop a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleError {
    /// The command was rejected before decoding.
    #[error(transparent)]
    Command(#[from] CommandError),
    /// The hardware description does not cover a routed group.
    #[error(transparent)]
    Sequence(#[from] SequenceError),
}

impl<D: SelectorDriver> RoutingController<D> {
    /// Initialize the driver and create a controller.
    pub fn new(driver: D, config: LatchConfig) -> Self {
        Self {
            sequencer: LatchSequencer::new(driver, config),
        }
    }

    /// Decode, route and latch one command.
    pub fn process(&mut self, command: &str) -> Result<Cycle, CycleError> {
        let decoded = decode(command)?;
        let latched = self.execute(&decoded)?;
        Ok(Cycle { decoded, latched })
    }

    /// Route and latch an already decoded command.
    ///
    /// Lets callers report per-token diagnostics before touching hardware.
    pub fn execute(&mut self, decoded: &DecodedCommand) -> Result<LatchReport, SequenceError> {
        self.apply_targets(&decoded.targets())
    }

    /// Route and latch per-channel targets.
    ///
    /// For callers that walk [`tokens`](crate::decoder::tokens) themselves
    /// instead of going through the bounded [`decode`].
    pub fn apply_targets(
        &mut self,
        targets: &ChannelTargets,
    ) -> Result<LatchReport, SequenceError> {
        let routes = route_targets(targets);
        self.sequencer.apply(&routes)
    }

    /// Hardware-visible position of every channel.
    #[inline]
    #[must_use]
    pub fn state(&self) -> &ChannelState {
        self.sequencer.state()
    }

    /// Get a reference to the sequencer.
    pub fn sequencer(&self) -> &LatchSequencer<D> {
        &self.sequencer
    }

    /// Get a mutable reference to the sequencer.
    pub fn sequencer_mut(&mut self) -> &mut LatchSequencer<D> {
        &mut self.sequencer
    }

    /// Decompose the controller into its driver and configuration.
    pub fn into_parts(self) -> (D, LatchConfig) {
        self.sequencer.into_parts()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::driver::{Level, PinId};
    use crate::latch::tests::{Event, RecordingDriver};
    use crate::types::{ChannelIndex, GroupIndex, Position};
    use heapless::Vec;
    use std::vec;

    fn controller() -> RoutingController<RecordingDriver> {
        RoutingController::new(RecordingDriver::default(), LatchConfig::default())
    }

    #[test]
    fn test_process_routes_and_latches() {
        let mut ctl = controller();
        let cycle = ctl.process("S0FgG1A").unwrap();

        assert_eq!(cycle.decoded.assignments().count(), 2);
        assert_eq!(cycle.decoded.diagnostics().count(), 1);
        assert_eq!(cycle.latched.groups.len(), 1);
        assert_eq!(
            ctl.state()[ChannelIndex::new(1).unwrap()],
            Position::Anode
        );
    }

    #[test]
    fn test_malformed_command_touches_nothing() {
        let mut ctl = controller();
        let err = ctl.process("X0F").unwrap_err();
        assert_eq!(
            err,
            CycleError::Command(CommandError::Malformed { found: 'X' })
        );
        assert_eq!(ctl.sequencer().driver().events, vec![Event::Init]);
    }

    #[test]
    fn test_all_invalid_tokens_still_succeed() {
        let mut ctl = controller();
        let cycle = ctl.process("SgFhZ").unwrap();
        assert_eq!(cycle.decoded.diagnostics().count(), 2);
        assert!(cycle.latched.groups.is_empty());
    }

    #[test]
    fn test_unknown_group_is_fatal() {
        let config = LatchConfig {
            latch_pins: Vec::from_slice(&[PinId(23)]).unwrap(),
            ..LatchConfig::default()
        };
        let mut ctl = RoutingController::new(RecordingDriver::default(), config);
        let err = ctl.process("S0G4G").unwrap_err();
        assert_eq!(
            err,
            CycleError::Sequence(SequenceError::UnknownGroup {
                group: GroupIndex::new(1).unwrap()
            })
        );
    }

    #[test]
    fn test_consecutive_cycles_keep_hardware_state() {
        let mut ctl = controller();
        ctl.process("S0C").unwrap();
        ctl.process("S1G").unwrap();
        assert_eq!(
            ctl.state()[ChannelIndex::new(0).unwrap()],
            Position::Cathode
        );
        assert_eq!(
            ctl.state()[ChannelIndex::new(1).unwrap()],
            Position::Ground
        );
    }

    #[test]
    fn test_duplicate_channel_latches_once() {
        let mut ctl = controller();
        ctl.process("S2A2C").unwrap();
        let highs = ctl
            .sequencer()
            .driver()
            .events
            .iter()
            .filter(|e| **e == Event::Write(PinId(23), Level::High))
            .count();
        assert_eq!(highs, 1);
        assert_eq!(
            ctl.state()[ChannelIndex::new(2).unwrap()],
            Position::Cathode
        );
    }

    #[test]
    fn test_apply_targets_has_no_length_bound() {
        use crate::decoder::tokens;
        use std::string::String;

        let mut command = String::from("S");
        for _ in 0..40 {
            command.push_str("0F5A");
        }
        let targets: ChannelTargets = tokens(&command)
            .unwrap()
            .filter_map(Result::ok)
            .collect();

        let mut ctl = controller();
        let latched = ctl.apply_targets(&targets).unwrap();
        assert_eq!(latched.channels, 2);
        assert_eq!(latched.groups.len(), 2);
        assert_eq!(
            ctl.state()[ChannelIndex::new(5).unwrap()],
            Position::Anode
        );
    }
}
