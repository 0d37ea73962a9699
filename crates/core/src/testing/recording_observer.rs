//! Observer that records every notification for test assertions.

use std::sync::{Mutex, MutexGuard};

use crate::convert::{ItemError, ItemObserver, TargetFormat};

/// A recorded successful item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedConversion {
    pub index: usize,
    pub name: String,
    pub format: TargetFormat,
    pub bytes: usize,
}

/// A recorded dropped item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedSkip {
    pub index: usize,
    pub name: Option<String>,
    pub format: TargetFormat,
    /// Failing stage, as reported by [`ItemError::stage`].
    pub stage: &'static str,
    pub message: String,
}

#[derive(Debug, Default)]
struct Recorded {
    converted: Vec<RecordedConversion>,
    skipped: Vec<RecordedSkip>,
    batches: Vec<(usize, usize)>,
}

/// Records item outcomes instead of logging them.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    recorded: Mutex<Recorded>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Recorded> {
        // a panicking test thread must not hide what was recorded
        self.recorded
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Successful items, in notification order.
    pub fn converted(&self) -> Vec<RecordedConversion> {
        self.lock().converted.clone()
    }

    /// Dropped items, in notification order.
    pub fn skipped(&self) -> Vec<RecordedSkip> {
        self.lock().skipped.clone()
    }

    /// `(submitted, converted)` for every finished batch.
    pub fn batches(&self) -> Vec<(usize, usize)> {
        self.lock().batches.clone()
    }

    pub fn clear(&self) {
        *self.lock() = Recorded::default();
    }
}

impl ItemObserver for RecordingObserver {
    fn item_converted(&self, index: usize, name: &str, format: TargetFormat, bytes: usize) {
        self.lock().converted.push(RecordedConversion {
            index,
            name: name.to_string(),
            format,
            bytes,
        });
    }

    fn item_skipped(
        &self,
        index: usize,
        name: Option<&str>,
        format: TargetFormat,
        error: &ItemError,
    ) {
        self.lock().skipped.push(RecordedSkip {
            index,
            name: name.map(str::to_string),
            format,
            stage: error.stage(),
            message: error.to_string(),
        });
    }

    fn batch_finished(&self, _format: TargetFormat, submitted: usize, converted: usize) {
        self.lock().batches.push((submitted, converted));
    }
}
