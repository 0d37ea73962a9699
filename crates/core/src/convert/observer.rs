//! Observers notified of per-item outcomes.
//!
//! The item pipeline never logs or counts on its own; it reports to whatever
//! [`ItemObserver`] it was built with.

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::error::ItemError;
use super::types::TargetFormat;
use crate::metrics::{BATCH_SIZE, ENCODED_BYTES, ITEMS_CONVERTED, ITEMS_SKIPPED};

/// Receives the outcome of every item in a batch.
pub trait ItemObserver: Send + Sync {
    /// An item produced an artifact of `bytes` encoded bytes.
    fn item_converted(&self, index: usize, name: &str, format: TargetFormat, bytes: usize);

    /// An item was dropped from the batch.
    fn item_skipped(
        &self,
        index: usize,
        name: Option<&str>,
        format: TargetFormat,
        error: &ItemError,
    );

    /// Every item of a batch has been processed.
    fn batch_finished(&self, _format: TargetFormat, _submitted: usize, _converted: usize) {}
}

/// Logs item outcomes through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ItemObserver for TracingObserver {
    fn item_converted(&self, index: usize, name: &str, format: TargetFormat, bytes: usize) {
        debug!(index, name, %format, bytes, "Converted item");
    }

    fn item_skipped(
        &self,
        index: usize,
        name: Option<&str>,
        format: TargetFormat,
        error: &ItemError,
    ) {
        warn!(
            index,
            name = name.unwrap_or("<unnamed>"),
            %format,
            stage = error.stage(),
            error = %error,
            "Skipping item that failed to convert"
        );
    }

    fn batch_finished(&self, format: TargetFormat, submitted: usize, converted: usize) {
        info!(
            %format,
            submitted,
            converted,
            skipped = submitted.saturating_sub(converted),
            "Batch conversion finished"
        );
    }
}

/// Counts item outcomes in the core prometheus metrics.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetricsObserver;

impl ItemObserver for MetricsObserver {
    fn item_converted(&self, _index: usize, _name: &str, format: TargetFormat, bytes: usize) {
        ITEMS_CONVERTED.with_label_values(&[format.as_str()]).inc();
        ENCODED_BYTES.observe(bytes as f64);
    }

    fn item_skipped(
        &self,
        _index: usize,
        _name: Option<&str>,
        format: TargetFormat,
        error: &ItemError,
    ) {
        ITEMS_SKIPPED
            .with_label_values(&[format.as_str(), error.stage()])
            .inc();
    }

    fn batch_finished(&self, _format: TargetFormat, submitted: usize, _converted: usize) {
        BATCH_SIZE.observe(submitted as f64);
    }
}

/// Forwards every notification to each member in order.
#[derive(Default, Clone)]
pub struct ObserverSet(Vec<Arc<dyn ItemObserver>>);

impl ObserverSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logging plus metrics, the production default.
    pub fn standard() -> Self {
        Self::new().with(TracingObserver).with(MetricsObserver)
    }

    pub fn with(mut self, observer: impl ItemObserver + 'static) -> Self {
        self.0.push(Arc::new(observer));
        self
    }

    pub fn with_shared(mut self, observer: Arc<dyn ItemObserver>) -> Self {
        self.0.push(observer);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl ItemObserver for ObserverSet {
    fn item_converted(&self, index: usize, name: &str, format: TargetFormat, bytes: usize) {
        for observer in &self.0 {
            observer.item_converted(index, name, format, bytes);
        }
    }

    fn item_skipped(
        &self,
        index: usize,
        name: Option<&str>,
        format: TargetFormat,
        error: &ItemError,
    ) {
        for observer in &self.0 {
            observer.item_skipped(index, name, format, error);
        }
    }

    fn batch_finished(&self, format: TargetFormat, submitted: usize, converted: usize) {
        for observer in &self.0 {
            observer.batch_finished(format, submitted, converted);
        }
    }
}
