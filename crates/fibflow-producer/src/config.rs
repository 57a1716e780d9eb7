//! Tunables of producers and of the user fetch.

use fibflow_core::time::Duration;

/// The shortest period a run ticks with.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Settings shared by both producers.
///
/// Intervals below [`MIN_INTERVAL`] are raised to it.
#[derive(Debug, Clone)]
pub struct ProducerConfig {
    /// The period of a restartable run.
    pub cold_interval: Duration,
    /// The period of the broadcast run.
    pub broadcast_interval: Duration,
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self {
            cold_interval: Duration::from_secs(2),
            broadcast_interval: Duration::from_secs(3),
        }
    }
}

impl ProducerConfig {
    pub fn with_cold_interval(mut self, interval: Duration) -> Self {
        self.cold_interval = interval.max(MIN_INTERVAL);
        self
    }

    pub fn with_broadcast_interval(mut self, interval: Duration) -> Self {
        self.broadcast_interval = interval.max(MIN_INTERVAL);
        self
    }

    pub(crate) fn cold_period(&self) -> Duration {
        self.cold_interval.max(MIN_INTERVAL)
    }

    pub(crate) fn broadcast_period(&self) -> Duration {
        self.broadcast_interval.max(MIN_INTERVAL)
    }
}

/// Settings of [`UserRepository`](crate::UserRepository).
#[derive(Debug, Clone)]
pub struct UserConfig {
    pub latency: Duration,
    pub name: String,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            latency: Duration::from_secs(5),
            name: "Manuel".into(),
        }
    }
}

impl UserConfig {
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_intervals_are_raised() {
        let config = ProducerConfig::default()
            .with_cold_interval(Duration::ZERO)
            .with_broadcast_interval(Duration::ZERO);
        assert_eq!(config.cold_interval, MIN_INTERVAL);
        assert_eq!(config.broadcast_interval, MIN_INTERVAL);

        let config = ProducerConfig {
            cold_interval: Duration::ZERO,
            broadcast_interval: Duration::ZERO,
        };
        assert_eq!(config.cold_period(), MIN_INTERVAL);
        assert_eq!(config.broadcast_period(), MIN_INTERVAL);
    }
}
