use std::fmt::Display;
use std::time::Duration;

use tokio::time::Instant;

use crate::units::{HumanDuration, TransferRate};
use crate::monitor::Config;

/// Overall progress observed at one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub at: Instant,
    pub bytes_completed: u64,
}

impl Sample {
    pub fn new(at: Instant, bytes_completed: u64) -> Self {
        Self {
            at,
            bytes_completed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Eta {
    /// Not enough information for an estimate yet
    Calculating,
    /// Estimate exceeds the configured cap
    Capped(Duration),
    Remaining(Duration),
}

impl Display for Eta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Calculating => write!(f, "calculating..."),
            Self::Capped(cap) => write!(f, "{}h+", cap.as_secs() / 3600),
            Self::Remaining(duration) => write!(f, "{}", HumanDuration(*duration)),
        }
    }
}

/// Turns successive samples into an exponentially smoothed throughput and an ETA.
///
/// Only the previous sample is kept. A smoothed rate of zero means no valid measurement has
/// been seen yet, and the next one replaces it outright instead of being blended in.
#[derive(Debug)]
pub struct ThroughputEstimator {
    previous: Option<Sample>,
    smoothed_rate: f64,
    smoothing_factor: f64,
    eta_cap: Duration,
}

impl ThroughputEstimator {
    pub fn new(config: &Config) -> Self {
        Self {
            previous: None,
            smoothed_rate: 0.0,
            smoothing_factor: config.smoothing_factor,
            eta_cap: config.eta_cap,
        }
    }

    /// Smoothed throughput in bytes per second.
    pub fn smoothed_rate(&self) -> f64 {
        self.smoothed_rate
    }

    pub fn update(&mut self, current: Sample, total_length: u64) -> Eta {
        let Some(previous) = self.previous else {
            self.previous = Some(current);
            return Eta::Calculating;
        };

        if current.at <= previous.at {
            return Eta::Calculating;
        }
        let elapsed = current.at - previous.at;

        // A decreasing count is an inconsistent read, not negative progress.
        let delta = current
            .bytes_completed
            .saturating_sub(previous.bytes_completed);
        let instant_rate = TransferRate::from_bytes(delta, elapsed).bps();

        let alpha = self.smoothing_factor;
        self.smoothed_rate = if self.smoothed_rate > 0.0 {
            alpha * instant_rate + (1.0 - alpha) * self.smoothed_rate
        } else {
            instant_rate
        };
        self.previous = Some(current);

        if self.smoothed_rate <= 0.0 {
            return Eta::Calculating;
        }

        let remaining = total_length.saturating_sub(current.bytes_completed);
        let seconds_remaining = remaining as f64 / self.smoothed_rate;
        if seconds_remaining > self.eta_cap.as_secs_f64() {
            return Eta::Capped(self.eta_cap);
        }
        Eta::Remaining(Duration::from_secs_f64(seconds_remaining))
    }
}
