use std::{fmt::Display, time::Duration};

use size::Size;

/// Amount of data moved over some elapsed time.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct TransferRate(pub Size, pub Duration);

impl Display for TransferRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/s", Size::from_bytes(self.bps()))
    }
}

impl TransferRate {
    pub fn from_bytes(bytes: u64, elapsed: Duration) -> Self {
        Self(Size::from_bytes(bytes), elapsed)
    }

    /// Bytes per second, 0 when no time has elapsed.
    pub fn bps(&self) -> f64 {
        let seconds = self.1.as_secs_f64();
        if seconds <= 0.0 {
            return 0.0;
        }
        (self.0.bytes().max(0) as f64) / seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_per_second() {
        let rate = TransferRate(Size::from_kibibytes(20), Duration::from_secs(2));

        assert_eq!(rate.bps(), 10240.0);
    }

    #[test]
    fn zero_duration_is_zero_rate() {
        let rate = TransferRate::from_bytes(1_000_000, Duration::ZERO);

        assert_eq!(rate.bps(), 0.0);
        assert_eq!(TransferRate::default().bps(), 0.0);
    }

    #[test]
    fn display() {
        let rate = TransferRate(Size::from_kibibytes(10), Duration::from_secs(1));

        assert_eq!(rate.to_string(), format!("{}/s", Size::from_kibibytes(10)));
    }
}
