//! What the window shows on each refresh tick, independent of the UI toolkit.

use crate::context::SensorSnapshot;
use crate::error::ThresholdError;
use crate::sample::{AlertStatus, Sample};

/// Rendered content of one refresh tick.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayFrame {
    pub temperature_text: String,
    pub humidity_text: String,
    pub status: AlertStatus,
    pub status_text: String,
    pub history_lines: Vec<HistoryLine>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HistoryLine {
    pub text: String,
    pub alert: bool,
}

impl DisplayFrame {
    /// Renders `snapshot` against the threshold currently in force.
    ///
    /// The status line compares the current temperature with `threshold`,
    /// while history lines keep the alert flag each sample was created with.
    pub fn render(snapshot: &SensorSnapshot, threshold: f32, visible_history: usize) -> Self {
        let status = AlertStatus::evaluate(snapshot.current.temperature_celsius, threshold);

        Self {
            temperature_text: format!("{:.1} °C", snapshot.current.temperature_celsius),
            humidity_text: format!("{:.1} %", snapshot.current.humidity_percent),
            status,
            status_text: status_text(status).to_string(),
            history_lines: snapshot
                .latest(visible_history)
                .iter()
                .map(HistoryLine::from)
                .collect(),
        }
    }
}

pub fn status_text(status: AlertStatus) -> &'static str {
    match status {
        AlertStatus::Normal => "Estado: Normal",
        AlertStatus::Alert => "Estado: ALERTA - Temperatura alta",
    }
}

impl From<&Sample> for HistoryLine {
    fn from(sample: &Sample) -> Self {
        Self {
            text: format!(
                "{} - Temp: {:.1}°C, Hum: {:.1}% - {}",
                sample.timestamp,
                sample.temperature_celsius,
                sample.humidity_percent,
                sample.status().label()
            ),
            alert: sample.alert,
        }
    }
}

/// Title and message of the notification shown after a threshold submit.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub title: &'static str,
    pub message: String,
    pub is_error: bool,
}

impl Notice {
    pub fn for_threshold_update(input: &str, result: &Result<f32, ThresholdError>) -> Self {
        match result {
            Ok(_) => Self {
                title: "Éxito",
                message: format!("Umbral establecido a {}°C", input.trim()),
                is_error: false,
            },
            Err(_) => Self {
                title: "Error",
                message: "Ingrese un valor numérico válido".into(),
                is_error: true,
            },
        }
    }
}
