use core::sync::atomic::Ordering;
use std::sync::Arc;

use portable_atomic::AtomicF32;

use crate::error::ThresholdError;

/// Threshold used until the user sets one, in °C.
pub const DEFAULT_THRESHOLD: f32 = 30.0;

/// Parses user input as a temperature threshold.
///
/// Surrounding whitespace is ignored. Non-finite values (`inf`, `NaN`) are
/// rejected.
pub fn parse_threshold(input: &str) -> Result<f32, ThresholdError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ThresholdError::Empty);
    }

    let value: f32 = trimmed
        .parse()
        .map_err(|_| ThresholdError::NotANumber(trimmed.to_string()))?;

    if !value.is_finite() {
        return Err(ThresholdError::NotFinite(trimmed.to_string()));
    }

    Ok(value)
}

/// Alert threshold shared between the UI, which writes it, and the generator,
/// which reads it once per sample.
#[derive(Clone, Debug)]
pub struct SharedThreshold(Arc<AtomicF32>);

impl SharedThreshold {
    pub fn new(value: f32) -> Self {
        Self(Arc::new(AtomicF32::new(value)))
    }

    pub fn get(&self) -> f32 {
        self.0.load(Ordering::Relaxed)
    }

    /// Parses `input` and stores it. On error the stored value is untouched.
    pub fn set_from_str(&self, input: &str) -> Result<f32, ThresholdError> {
        let value = parse_threshold(input)?;
        self.0.store(value, Ordering::Relaxed);
        log::info!("Alert threshold set to {value:.1}°C");
        Ok(value)
    }
}

impl Default for SharedThreshold {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}
