use std::time::{Duration, Instant};

use crate::config::Config;
use crate::constants::TIMER_FREQUENCY;

/// # Scheduler
/// Paces the engine against the wall clock with two accumulators:
/// - the timer accumulator releases one timer tick per 1/60s
/// - the cycle accumulator releases one instruction per `Config::cycle_period`
///
/// Elapsed time is banked, so the number of ticks released only depends on how
/// much time has passed, not on how it was sliced up between calls.
pub struct Scheduler {
    timer_period: Duration,
    cycle_period: Duration,
    timer_acc: Duration,
    cycle_acc: Duration,
    last_tick: Option<Instant>,
}

impl Scheduler {
    pub fn new(config: &Config) -> Self {
        Scheduler {
            timer_period: Duration::from_secs(1) / TIMER_FREQUENCY,
            cycle_period: config.cycle_period(),
            timer_acc: Duration::default(),
            cycle_acc: Duration::default(),
            last_tick: None,
        }
    }

    /// Time since the previous call, nothing on the first one
    pub fn elapsed(&mut self) -> Duration {
        let now = Instant::now();
        let delta = self
            .last_tick
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or_default();
        self.last_tick = Some(now);
        delta
    }

    pub fn bank_timer_time(&mut self, delta: Duration) {
        self.timer_acc += delta;
    }

    pub fn bank_cycle_time(&mut self, delta: Duration) {
        self.cycle_acc += delta;
    }

    /// Withdraws one timer period if enough time is banked
    pub fn timer_due(&mut self) -> bool {
        Self::withdraw(&mut self.timer_acc, self.timer_period)
    }

    /// Withdraws one cycle period if enough time is banked
    pub fn cycle_due(&mut self) -> bool {
        Self::withdraw(&mut self.cycle_acc, self.cycle_period)
    }

    /// Empties both accumulators and forgets the previous tick
    pub fn reset(&mut self) {
        self.timer_acc = Duration::default();
        self.cycle_acc = Duration::default();
        self.last_tick = None;
    }

    fn withdraw(acc: &mut Duration, period: Duration) -> bool {
        if *acc >= period {
            *acc -= period;
            true
        } else {
            false
        }
    }
}
