use std::thread::JoinHandle;
use std::time::Duration;

use crate::config::MonitorConfig;
use crate::context::{ActiveFlag, SensorContext, SensorSnapshot};
use crate::error::ConfigError;
use crate::history::History;
use crate::sample::Sample;
use crate::sensor::{Reading, SensorSource, SensorSourcePointer, FALLBACK_READING};

/// Produces samples from a sensor source and publishes them into the shared
/// context.
///
/// The generator owns the history. The UI only ever sees published
/// [`SensorSnapshot`]s.
pub struct Generator {
    source: SensorSourcePointer,
    context: SensorContext,
    history: History,
    current: Reading,
    interval: Duration,
}

impl Generator {
    /// Fails if `config` does not pass [`MonitorConfig::validate`].
    pub fn new(
        source: SensorSourcePointer,
        context: SensorContext,
        config: &MonitorConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            source,
            context,
            history: History::with_capacity(config.history_capacity),
            current: Reading::default(),
            interval: config.generation_interval(),
        })
    }

    /// Takes one reading, appends it to the history and publishes a snapshot.
    ///
    /// A failing or invalid reading is logged and replaced by
    /// [`FALLBACK_READING`] as the current value. It is not added to the
    /// history, so `None` is returned. Once the context is stopped nothing is
    /// appended or published.
    pub fn generate_sample(&mut self) -> Option<&Sample> {
        let threshold = self.context.threshold.get();
        let reading = self.source.read().and_then(Reading::validate);

        if !self.context.active.is_active() {
            log::debug!("Discarding reading taken while stopping");
            return None;
        }

        let appended = match reading {
            Ok(reading) => {
                let sample = Sample::now(reading, threshold);
                match serde_json::to_string(&sample) {
                    Ok(json) => log::debug!("Sample: {json}"),
                    Err(e) => log::warn!("Could not serialize sample: {e}"),
                }

                self.current = reading;
                self.history.push(sample);
                true
            }
            Err(e) => {
                log::error!("Error generating reading: {e}");
                self.current = FALLBACK_READING;
                false
            }
        };

        self.context
            .snapshots
            .publish(SensorSnapshot::new(self.current, &self.history));

        if appended {
            self.history.last()
        } else {
            None
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn current(&self) -> Reading {
        self.current
    }

    /// Generates samples until the context's active flag is cleared.
    ///
    /// The flag is checked once per interval, so stopping takes effect at
    /// the latest one interval later.
    pub fn run(mut self) {
        log::info!("Reading generator started, interval {:?}", self.interval);

        while self.context.active.is_active() {
            self.generate_sample();
            std::thread::sleep(self.interval);
        }

        log::info!(
            "Reading generator stopped after {} samples in history",
            self.history.len()
        );
    }

    /// Runs the generator on its own thread.
    pub fn spawn(self) -> std::io::Result<GeneratorHandle> {
        let active = self.context.active.clone();
        let thread = std::thread::Builder::new()
            .name("sensor_task".into())
            .spawn(move || self.run())?;

        Ok(GeneratorHandle {
            active,
            thread: Some(thread),
        })
    }
}

/// Owner side of a spawned [`Generator`].
pub struct GeneratorHandle {
    active: ActiveFlag,
    thread: Option<JoinHandle<()>>,
}

impl GeneratorHandle {
    /// Requests the generator to stop. Does not wait for it.
    pub fn stop(&self) {
        if self.active.stop() {
            log::info!("Stopping reading generator");
        }
    }

    pub fn is_running(&self) -> bool {
        self.active.is_active()
    }

    /// Stops the generator and waits for its thread to finish.
    pub fn join(mut self) {
        self.stop();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("Reading generator thread panicked");
            }
        }
    }
}

impl Drop for GeneratorHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::DisplayFrame;
    use crate::error::SensorError;
    use crate::sample::AlertStatus;
    use crate::sensor::{SimulatedSensor, HUMIDITY_RANGE, TEMPERATURE_RANGE};

    /// Replays canned readings, then fails.
    struct ScriptedSensor(std::collections::VecDeque<Result<Reading, SensorError>>);

    impl SensorSource for ScriptedSensor {
        fn read(&mut self) -> Result<Reading, SensorError> {
            self.0
                .pop_front()
                .unwrap_or(Err(SensorError::Source("script exhausted".into())))
        }
    }

    fn scripted(readings: impl IntoIterator<Item = Result<Reading, SensorError>>) -> Generator {
        Generator::new(
            Box::new(ScriptedSensor(readings.into_iter().collect())),
            SensorContext::default(),
            &MonitorConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn simulated_samples_are_in_range_and_bounded() {
        let context = SensorContext::default();
        let mut generator = Generator::new(
            Box::new(SimulatedSensor::seeded(1)),
            context.clone(),
            &MonitorConfig::default(),
        )
        .unwrap();

        for _ in 0..250 {
            let sample = generator.generate_sample().unwrap();
            assert!(TEMPERATURE_RANGE.contains(&sample.temperature_celsius));
            assert!(HUMIDITY_RANGE.contains(&sample.humidity_percent));
            assert_eq!(sample.alert, sample.temperature_celsius > 30.0);
            assert!(generator.history().len() <= 100);
        }

        assert_eq!(generator.history().len(), 100);
        assert_eq!(context.snapshots.latest().history.len(), 100);
    }

    #[test]
    fn alert_uses_threshold_at_generation_time() {
        let mut generator = scripted([Ok(Reading::new(35.0, 40.0)), Ok(Reading::new(20.0, 40.0))]);
        let context = generator.context.clone();

        assert!(generator.generate_sample().unwrap().alert);
        let frame = DisplayFrame::render(&context.snapshots.latest(), context.threshold.get(), 5);
        assert_eq!(frame.status, AlertStatus::Alert);
        assert!(frame.status_text.contains("ALERTA"));

        assert!(!generator.generate_sample().unwrap().alert);
        let frame = DisplayFrame::render(&context.snapshots.latest(), context.threshold.get(), 5);
        assert_eq!(frame.status, AlertStatus::Normal);
        assert!(frame.status_text.contains("Normal"));

        // Raising the threshold afterwards does not rewrite history.
        context.threshold.set_from_str("40").unwrap();
        let alerts: Vec<_> = generator.history().iter().map(|s| s.alert).collect();
        assert_eq!(alerts, [true, false]);
    }

    #[test]
    fn threshold_change_applies_to_next_sample() {
        let mut generator = scripted([Ok(Reading::new(20.0, 40.0)), Ok(Reading::new(20.0, 40.0))]);

        assert!(!generator.generate_sample().unwrap().alert);
        generator.context.threshold.set_from_str("15").unwrap();
        assert!(generator.generate_sample().unwrap().alert);
    }

    #[test]
    fn failed_reading_falls_back_without_history_entry() {
        let mut generator = scripted([
            Ok(Reading::new(12.0, 30.0)),
            Ok(Reading::new(-3.0, 30.0)),
            Err(SensorError::Source("bus error".into())),
        ]);
        let context = generator.context.clone();

        assert!(generator.generate_sample().is_some());
        assert!(generator.generate_sample().is_none());
        assert_eq!(generator.current(), FALLBACK_READING);
        assert!(generator.generate_sample().is_none());

        let snapshot = context.snapshots.latest();
        assert_eq!(snapshot.current, FALLBACK_READING);
        assert_eq!(snapshot.history.len(), 1);
        assert_eq!(snapshot.history[0].temperature_celsius, 12.0);
    }

    #[test]
    fn run_returns_immediately_when_stopped() {
        let generator = scripted([Ok(Reading::new(12.0, 30.0))]);
        let context = generator.context.clone();

        context.active.stop();
        generator.run();

        assert!(context.snapshots.latest().history.is_empty());
    }

    #[test]
    fn rejects_zero_history_capacity() {
        let config = MonitorConfig {
            history_capacity: 0,
            ..MonitorConfig::default()
        };

        let result = Generator::new(
            Box::new(SimulatedSensor::seeded(1)),
            SensorContext::default(),
            &config,
        );

        assert!(matches!(result, Err(ConfigError::Zero("history_capacity"))));
    }

    #[test]
    fn rejects_zero_generation_interval() {
        let config = MonitorConfig {
            generation_interval_ms: 0,
            ..MonitorConfig::default()
        };

        let result = Generator::new(
            Box::new(SimulatedSensor::seeded(1)),
            SensorContext::default(),
            &config,
        );

        assert!(matches!(result, Err(ConfigError::Zero("generation_interval_ms"))));
    }

    #[test]
    fn nothing_is_appended_or_published_once_stopped() {
        let mut generator = scripted([Ok(Reading::new(12.0, 30.0)), Ok(Reading::new(35.0, 30.0))]);
        let context = generator.context.clone();

        assert!(generator.generate_sample().is_some());
        context.active.stop();

        assert!(generator.generate_sample().is_none());
        assert_eq!(generator.history().len(), 1);
        assert_eq!(generator.current(), Reading::new(12.0, 30.0));

        let snapshot = context.snapshots.latest();
        assert_eq!(snapshot.history.len(), 1);
        assert_eq!(snapshot.current, Reading::new(12.0, 30.0));
    }

    #[test]
    fn sample_is_logged_as_json() {
        let sample = Sample::at("2024-05-01 12:00:00", Reading::new(35.0, 40.0), 30.0);
        let json = serde_json::to_string(&sample).unwrap();

        assert_eq!(
            json,
            r#"{"timestamp":"2024-05-01 12:00:00","temperature_celsius":35.0,"humidity_percent":40.0,"alert":true}"#
        );
    }
}
