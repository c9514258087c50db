use thiserror::Error;

/// A reading that could not be produced or failed validation.
///
/// Never surfaced to the user: the generator logs it and falls back to
/// [`crate::sensor::FALLBACK_READING`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SensorError {
    #[error("temperature {0} outside of {min}..={max}", min = crate::sensor::TEMPERATURE_RANGE.start(), max = crate::sensor::TEMPERATURE_RANGE.end())]
    TemperatureOutOfRange(f32),

    #[error("humidity {0} outside of {min}..={max}", min = crate::sensor::HUMIDITY_RANGE.start(), max = crate::sensor::HUMIDITY_RANGE.end())]
    HumidityOutOfRange(f32),

    #[error("sensor source failed: {0}")]
    Source(String),
}

/// Rejected threshold input.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ThresholdError {
    #[error("threshold input is empty")]
    Empty,

    #[error("`{0}` is not a number")]
    NotANumber(String),

    #[error("threshold must be finite, got `{0}`")]
    NotFinite(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("`{0}` must be greater than zero")]
    Zero(&'static str),

    #[error("default threshold must be finite")]
    Threshold,
}
