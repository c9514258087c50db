//! Simulated temperature/humidity sensor shared between a background
//! generator thread and a periodically refreshed display.

pub mod config;
pub mod context;
pub mod display;
pub mod error;
pub mod generator;
pub mod history;
pub mod sample;
pub mod sensor;
pub mod threshold;

pub use config::MonitorConfig;
pub use context::{ActiveFlag, SensorContext, SensorSnapshot, SnapshotStore};
pub use display::{DisplayFrame, HistoryLine, Notice};
pub use error::{ConfigError, SensorError, ThresholdError};
pub use generator::{Generator, GeneratorHandle};
pub use history::History;
pub use sample::{AlertStatus, Sample};
pub use sensor::{Reading, SensorSource, SensorSourcePointer, SimulatedSensor};
pub use threshold::SharedThreshold;
