use std::time::Duration;

/// Configuration settings for the progress monitor
#[derive(Clone, Debug)]
pub struct Config {
    /// Time between samples of the transfer, never zero
    pub tick_interval: Duration,
    /// Weight of the newest rate measurement in the moving average, in (0, 1]
    pub smoothing_factor: f64,
    /// Estimates longer than this are shown as saturated
    pub eta_cap: Duration,
}

#[allow(dead_code)]
impl Config {
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval.max(Duration::from_millis(1));
        self
    }

    pub fn with_smoothing_factor(mut self, factor: f64) -> Self {
        self.smoothing_factor = factor.clamp(f64::EPSILON, 1.0);
        self
    }

    pub fn with_eta_cap(mut self, cap: Duration) -> Self {
        self.eta_cap = cap;
        self
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            smoothing_factor: 0.3,
            eta_cap: Duration::from_secs(99 * 60 * 60),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
