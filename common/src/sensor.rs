use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::SensorError;

/// Temperature range of the simulated sensor, in °C.
pub const TEMPERATURE_RANGE: RangeInclusive<f32> = 0.0..=50.0;

/// Relative humidity range of the simulated sensor, in %.
pub const HUMIDITY_RANGE: RangeInclusive<f32> = 20.0..=90.0;

/// Used in place of a reading that failed validation.
pub const FALLBACK_READING: Reading = Reading {
    temperature_celsius: 25.0,
    humidity_percent: 50.0,
};

/// A raw temperature/humidity pair as delivered by a sensor source.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Reading {
    pub temperature_celsius: f32,
    pub humidity_percent: f32,
}

impl Reading {
    pub fn new(temperature_celsius: f32, humidity_percent: f32) -> Self {
        Self {
            temperature_celsius,
            humidity_percent,
        }
    }

    /// Checks the reading against the sensor ranges.
    pub fn validate(self) -> Result<Self, SensorError> {
        if !self.temperature_celsius.is_finite()
            || !TEMPERATURE_RANGE.contains(&self.temperature_celsius)
        {
            return Err(SensorError::TemperatureOutOfRange(self.temperature_celsius));
        }
        if !self.humidity_percent.is_finite() || !HUMIDITY_RANGE.contains(&self.humidity_percent) {
            return Err(SensorError::HumidityOutOfRange(self.humidity_percent));
        }
        Ok(self)
    }
}

/// Something that delivers temperature/humidity readings.
pub trait SensorSource {
    fn read(&mut self) -> Result<Reading, SensorError>;
}

pub type SensorSourcePointer = Box<dyn SensorSource + Send>;

/// Uniformly distributed random readings, rounded to one decimal.
pub struct SimulatedSensor<R = StdRng> {
    rng: R,
}

impl SimulatedSensor<StdRng> {
    /// A simulated sensor seeded from the operating system.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// A reproducible simulated sensor.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for SimulatedSensor<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> SimulatedSensor<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> SensorSource for SimulatedSensor<R> {
    fn read(&mut self) -> Result<Reading, SensorError> {
        let temperature = self.rng.random_range(TEMPERATURE_RANGE);
        let humidity = self.rng.random_range(HUMIDITY_RANGE);

        Ok(Reading::new(
            round_to_tenth(temperature),
            round_to_tenth(humidity),
        ))
    }
}

/// Rounds to one decimal place. Values inside a range with integral bounds
/// stay inside it.
pub fn round_to_tenth(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_readings_stay_in_range() {
        let mut sensor = SimulatedSensor::seeded(7);

        for _ in 0..10_000 {
            let reading = sensor.read().unwrap();
            assert!(TEMPERATURE_RANGE.contains(&reading.temperature_celsius));
            assert!(HUMIDITY_RANGE.contains(&reading.humidity_percent));
            assert!(reading.validate().is_ok());
        }
    }

    #[test]
    fn simulated_readings_have_one_decimal() {
        let mut sensor = SimulatedSensor::seeded(42);

        for _ in 0..1_000 {
            let reading = sensor.read().unwrap();
            let tenths = reading.temperature_celsius * 10.0;
            assert!((tenths - tenths.round()).abs() < 1e-3, "{reading:?}");
            let tenths = reading.humidity_percent * 10.0;
            assert!((tenths - tenths.round()).abs() < 1e-3, "{reading:?}");
        }
    }

    #[test]
    fn validation_rejects_out_of_range_values() {
        assert_eq!(
            Reading::new(-0.5, 50.0).validate(),
            Err(SensorError::TemperatureOutOfRange(-0.5))
        );
        assert_eq!(
            Reading::new(20.0, 95.0).validate(),
            Err(SensorError::HumidityOutOfRange(95.0))
        );
        assert!(Reading::new(f32::NAN, 50.0).validate().is_err());
        assert!(FALLBACK_READING.validate().is_ok());
    }

    #[test]
    fn rounding_keeps_bounds() {
        assert_eq!(round_to_tenth(49.96), 50.0);
        assert_eq!(round_to_tenth(20.04), 20.0);
        assert_eq!(round_to_tenth(12.345), 12.3);
    }
}
