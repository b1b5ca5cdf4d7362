use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Number of coarse-sleep observations the running average spans.
pub const RING_CAPACITY: usize = 32;

/// Tuning for the adaptive sleep engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Nominal chunk requested from the OS on every coarse-sleep iteration.
    pub min_sleep: Duration,
    /// Average above `min_sleep * bad_sleep_factor` counts as divergent.
    pub bad_sleep_factor: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_sleep: Duration::from_millis(2),
            bad_sleep_factor: 3,
        }
    }
}

impl EngineConfig {
    pub fn bad_sleep_average(&self) -> Duration {
        self.min_sleep * self.bad_sleep_factor
    }

    /// Pessimistic prior used to prime and reseed the running average.
    pub fn seed(&self) -> Duration {
        self.min_sleep * 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let config = EngineConfig::default();
        assert_eq!(config.min_sleep, Duration::from_millis(2));
        assert_eq!(config.bad_sleep_average(), Duration::from_millis(6));
        assert_eq!(config.seed(), Duration::from_millis(4));
    }

    #[test]
    fn test_json_roundtrip_keeps_durations_exact() {
        let config = EngineConfig {
            min_sleep: Duration::from_micros(1500),
            bad_sleep_factor: 4,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
        assert_eq!(back.bad_sleep_average(), Duration::from_millis(6));
    }
}
