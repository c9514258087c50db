use serde::Serialize;

use crate::sensor::Reading;

/// Format used for sample timestamps, local time.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One timestamped reading together with the alert flag derived from the
/// threshold in force when it was taken.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Sample {
    pub timestamp: String,
    pub temperature_celsius: f32,
    pub humidity_percent: f32,
    pub alert: bool,
}

impl Sample {
    /// Stamps `reading` with the current local time.
    pub fn now(reading: Reading, threshold: f32) -> Self {
        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
        Self::at(timestamp, reading, threshold)
    }

    pub fn at(timestamp: impl Into<String>, reading: Reading, threshold: f32) -> Self {
        Self {
            timestamp: timestamp.into(),
            temperature_celsius: reading.temperature_celsius,
            humidity_percent: reading.humidity_percent,
            alert: AlertStatus::evaluate(reading.temperature_celsius, threshold).is_alert(),
        }
    }

    pub fn status(&self) -> AlertStatus {
        if self.alert {
            AlertStatus::Alert
        } else {
            AlertStatus::Normal
        }
    }
}

/// Whether a temperature is above the alert threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AlertStatus {
    #[default]
    Normal,
    Alert,
}

impl AlertStatus {
    /// Strictly greater than: a temperature equal to the threshold is normal.
    pub fn evaluate(temperature_celsius: f32, threshold: f32) -> Self {
        if temperature_celsius > threshold {
            Self::Alert
        } else {
            Self::Normal
        }
    }

    pub fn is_alert(self) -> bool {
        self == Self::Alert
    }

    /// Short label used in history lines.
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Alert => "ALERTA",
        }
    }
}

#[test]
fn alert_is_strictly_above_threshold() {
    assert_eq!(AlertStatus::evaluate(30.1, 30.0), AlertStatus::Alert);
    assert_eq!(AlertStatus::evaluate(30.0, 30.0), AlertStatus::Normal);
    assert_eq!(AlertStatus::evaluate(0.0, 30.0), AlertStatus::Normal);
}

#[test]
fn sample_captures_threshold_at_creation() {
    let reading = Reading::new(35.0, 40.0);
    let sample = Sample::at("2024-05-01 12:00:00", reading, 30.0);
    assert!(sample.alert);
    assert_eq!(sample.status().label(), "ALERTA");

    let sample = Sample::at("2024-05-01 12:00:02", Reading::new(20.0, 40.0), 30.0);
    assert!(!sample.alert);
    assert_eq!(sample.status().label(), "Normal");
}

#[test]
fn sample_timestamp_uses_local_format() {
    let sample = Sample::now(Reading::new(10.0, 30.0), 30.0);
    assert!(chrono::NaiveDateTime::parse_from_str(&sample.timestamp, TIMESTAMP_FORMAT).is_ok());
}

#[test]
fn sample_serializes_to_json() {
    let sample = Sample::at("2024-05-01 12:00:00", Reading::new(35.5, 40.0), 30.0);
    let json = serde_json::to_value(&sample).unwrap();
    assert_eq!(json["timestamp"], "2024-05-01 12:00:00");
    assert_eq!(json["alert"], true);
}
