use std::time::Duration;

use crate::constants::DEFAULT_INSTRUCTIONS_PER_SECOND;

/// Rates above 1GHz would otherwise round the period down to nothing
const MIN_CYCLE_PERIOD: Duration = Duration::from_nanos(1);

/// Runtime settings for the engine
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Config {
    pub instructions_per_second: u32,
}

impl Config {
    /// # Arguments
    /// * `instructions_per_second` how many instructions to run each second, 0 for the default
    pub fn new(instructions_per_second: u32) -> Self {
        let instructions_per_second = match instructions_per_second {
            0 => DEFAULT_INSTRUCTIONS_PER_SECOND,
            ips => ips,
        };
        Config {
            instructions_per_second,
        }
    }

    /// Wall-clock time budgeted to a single instruction, never less than 1ns
    pub fn cycle_period(&self) -> Duration {
        (Duration::from_secs(1) / self.instructions_per_second.max(1)).max(MIN_CYCLE_PERIOD)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_INSTRUCTIONS_PER_SECOND)
    }
}
