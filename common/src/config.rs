use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::history::HISTORY_CAPACITY;
use crate::threshold::DEFAULT_THRESHOLD;

/// Timing and sizing of the monitor.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct MonitorConfig {
    /// Pause between two generated samples.
    pub generation_interval_ms: u64,
    /// Period of the display refresh.
    pub refresh_interval_ms: u64,
    pub default_threshold: f32,
    pub history_capacity: usize,
    /// Number of history lines shown in the window.
    pub visible_history: usize,
}

impl MonitorConfig {
    /// Loads the configuration bundled with the binary.
    pub fn new() -> Result<Self, ConfigError> {
        let json_data = std::include_str!("./monitor.json");

        Self::from_json(json_data)
    }

    pub fn from_json(json_data: &str) -> Result<Self, ConfigError> {
        let config = serde_json::from_str::<Self>(json_data)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects zero intervals, a zero history capacity and a non-finite
    /// default threshold.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.generation_interval_ms == 0 {
            return Err(ConfigError::Zero("generation_interval_ms"));
        }
        if self.refresh_interval_ms == 0 {
            return Err(ConfigError::Zero("refresh_interval_ms"));
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::Zero("history_capacity"));
        }
        if !self.default_threshold.is_finite() {
            return Err(ConfigError::Threshold);
        }
        Ok(())
    }

    pub fn generation_interval(&self) -> Duration {
        Duration::from_millis(self.generation_interval_ms)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            generation_interval_ms: 2000,
            refresh_interval_ms: 1000,
            default_threshold: DEFAULT_THRESHOLD,
            history_capacity: HISTORY_CAPACITY,
            visible_history: 5,
        }
    }
}

#[test]
fn test_bundled_config() {
    let config = MonitorConfig::new().unwrap();

    assert_eq!(config, MonitorConfig::default());
    assert_eq!(config.generation_interval(), Duration::from_secs(2));
    assert_eq!(config.refresh_interval(), Duration::from_secs(1));
}

#[test]
fn test_partial_config_uses_defaults() {
    let config = MonitorConfig::from_json(r#"{ "default_threshold": 25.5 }"#).unwrap();

    assert_eq!(config.default_threshold, 25.5);
    assert_eq!(config.history_capacity, HISTORY_CAPACITY);
}

#[test]
fn test_invalid_config() {
    assert!(matches!(
        MonitorConfig::from_json(r#"{ "history_capacity": 0 }"#),
        Err(ConfigError::Zero("history_capacity"))
    ));
    assert!(matches!(
        MonitorConfig::from_json("not json"),
        Err(ConfigError::Parse(_))
    ));
}
