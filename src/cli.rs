//! Command-line arguments for sp3t-route

use clap::{ArgAction, Parser};
use heapless::Vec as HVec;
use selector_core::{LatchConfig, PinId, DEFAULT_OUTPUT_ENABLE_PIN, DEFAULT_SETTLE_US, NUM_GROUPS};

use crate::error::ConfigError;

/// Route signal channels to SP3T selector positions
#[derive(Parser, Debug, Clone)]
#[command(name = "sp3t-route", version, about, long_about = None)]
pub struct Cli {
    /// Routing command: 'S' followed by <hex channel><F|C|A|G> pairs
    #[arg(value_name = "COMMAND", allow_hyphen_values = true)]
    pub command: Option<String>,

    /// Read one command per line from standard input
    #[arg(long, conflicts_with = "command")]
    pub stdin: bool,

    /// Latch hold time in microseconds
    #[arg(long, value_name = "US", default_value_t = DEFAULT_SETTLE_US)]
    pub settle_us: u32,

    /// Latch-enable lines for groups 0, 1, ... (comma separated)
    #[arg(long, value_name = "PINS", value_delimiter = ',', default_values_t = [23u8, 24, 25, 27])]
    pub latch_pins: Vec<u8>,

    /// Output-enable line
    #[arg(long, value_name = "PIN", default_value_t = DEFAULT_OUTPUT_ENABLE_PIN.0)]
    pub oe_pin: u8,

    /// Do not drive an output-enable line
    #[arg(long)]
    pub no_oe: bool,

    /// Print every channel's position after each command
    #[arg(long)]
    pub status: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Build the latch configuration from the hardware flags.
    pub fn latch_config(&self) -> Result<LatchConfig, ConfigError> {
        let mut latch_pins: HVec<PinId, NUM_GROUPS> = HVec::new();
        for &pin in &self.latch_pins {
            latch_pins
                .push(PinId(pin))
                .map_err(|_| ConfigError::TooManyLatchPins {
                    given: self.latch_pins.len(),
                })?;
        }

        Ok(LatchConfig {
            latch_pins,
            output_enable: (!self.no_oe).then_some(PinId(self.oe_pin)),
            settle_us: self.settle_us,
        })
    }

    /// Log filter directive for the `-v` count.
    #[must_use]
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
