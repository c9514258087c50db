use core::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::history::History;
use crate::sample::Sample;
use crate::sensor::Reading;
use crate::threshold::SharedThreshold;

/// What the generator publishes after every tick: the current reading and a
/// copy of the history.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SensorSnapshot {
    pub current: Reading,
    pub history: Vec<Sample>,
}

impl SensorSnapshot {
    pub fn new(current: Reading, history: &History) -> Self {
        Self {
            current,
            history: history.iter().cloned().collect(),
        }
    }

    /// The last `count` samples, most recent last.
    pub fn latest(&self, count: usize) -> &[Sample] {
        let start = self.history.len().saturating_sub(count);
        &self.history[start..]
    }
}

/// Holds the most recently published snapshot.
///
/// Writers replace the whole `Arc`, readers clone it, so the lock is only held
/// for a pointer swap.
#[derive(Clone, Default)]
pub struct SnapshotStore(Arc<Mutex<Arc<SensorSnapshot>>>);

impl SnapshotStore {
    /// Publishes `snapshot` as the latest one.
    ///
    /// # Panics
    ///
    /// If the internally used mutex is poisoned.
    pub fn publish(&self, snapshot: SensorSnapshot) {
        let mut latest = self.0.lock().unwrap();
        *latest = Arc::new(snapshot);
    }

    /// Gets the latest snapshot. Never blocks on the generator for longer
    /// than a publish.
    ///
    /// # Panics
    ///
    /// If the internally used mutex is poisoned.
    pub fn latest(&self) -> Arc<SensorSnapshot> {
        self.0.lock().unwrap().clone()
    }
}

/// Running/Stopped state of the generator. Once cleared it stays cleared.
#[derive(Clone, Debug)]
pub struct ActiveFlag(Arc<AtomicBool>);

impl ActiveFlag {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_active(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Returns whether this call did the transition.
    pub fn stop(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}

impl Default for ActiveFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the generator and the UI share, passed explicitly to both.
#[derive(Clone, Default)]
pub struct SensorContext {
    pub threshold: SharedThreshold,
    pub snapshots: SnapshotStore,
    pub active: ActiveFlag,
}

impl SensorContext {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: SharedThreshold::new(threshold),
            snapshots: SnapshotStore::default(),
            active: ActiveFlag::new(),
        }
    }
}
