use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::constants::SECONDS_PER_DAY;

/// Wall-clock timestamp in seconds since the unix epoch.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Clock(f64);

impl Clock {
    pub fn now() -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO);
        let timestamp = now.as_secs() as f64 + now.subsec_micros() as f64 * 1e-6;
        Self(timestamp)
    }

    pub fn from_secs(timestamp: f64) -> Self {
        Self(timestamp)
    }

    /// Returns the instant `lookback` before this one.
    pub fn rewind(&self, lookback: Duration) -> Self {
        Self(self.0 - lookback.as_secs_f64())
    }

    pub fn as_secs(&self) -> f64 {
        self.0
    }

    /// Formats the time of day (UTC) as `HH:MM:SS`.
    pub fn time_of_day(&self) -> String {
        let secs_of_day = (self.0.max(0.0) as u64) % SECONDS_PER_DAY;
        format!(
            "{:02}:{:02}:{:02}",
            secs_of_day / 3600,
            (secs_of_day % 3600) / 60,
            secs_of_day % 60
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_now() {
        let clock = Clock::now();
        assert!(clock.as_secs() > 0.0);
    }

    #[test]
    fn test_clock_as_secs() {
        let clock = Clock(12345.678);
        assert_eq!(clock.as_secs(), 12345.678);
    }

    #[test]
    fn test_clock_now_is_recent() {
        let clock = Clock::now();
        let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap();
        let timestamp = now.as_secs() as f64 + now.subsec_micros() as f64 * 1e-6;
        assert!((clock.as_secs() - timestamp).abs() < 1.0);
    }

    #[test]
    fn test_rewind() {
        let clock = Clock::from_secs(1000.0);
        assert_eq!(clock.rewind(Duration::from_secs(120)).as_secs(), 880.0);
    }

    #[test]
    fn test_time_of_day() {
        // 1970-01-02 01:02:03 UTC
        let clock = Clock::from_secs((SECONDS_PER_DAY + 3723) as f64);
        assert_eq!(clock.time_of_day(), "01:02:03");
    }
}
