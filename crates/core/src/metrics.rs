//! Prometheus metrics for the conversion core.
//!
//! Only [`crate::convert::MetricsObserver`] writes these; the server
//! registers them via [`all_metrics`].

use once_cell::sync::Lazy;
use prometheus::core::Collector;
use prometheus::{Histogram, HistogramOpts, IntCounterVec, Opts};

/// Items converted, by target format.
pub static ITEMS_CONVERTED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("pixshift_items_converted_total", "Items converted successfully"),
        &["format"],
    )
    .unwrap()
});

/// Items dropped from a batch, by target format and failing stage.
pub static ITEMS_SKIPPED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("pixshift_items_skipped_total", "Items dropped from a batch"),
        &["format", "stage"], // stage: "extract", "encode"
    )
    .unwrap()
});

/// Items submitted per batch.
pub static BATCH_SIZE: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new("pixshift_batch_size", "Items submitted per batch")
            .buckets(vec![1.0, 2.0, 5.0, 10.0, 25.0, 50.0, 100.0]),
    )
    .unwrap()
});

/// Size of encoded artifacts in bytes.
pub static ENCODED_BYTES: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new("pixshift_encoded_bytes", "Size of encoded artifacts")
            .buckets(prometheus::exponential_buckets(1024.0, 4.0, 8).unwrap()),
    )
    .unwrap()
});

/// All core metrics, for registration in the server registry.
pub fn all_metrics() -> Vec<Box<dyn Collector>> {
    vec![
        Box::new(ITEMS_CONVERTED.clone()),
        Box::new(ITEMS_SKIPPED.clone()),
        Box::new(BATCH_SIZE.clone()),
        Box::new(ENCODED_BYTES.clone()),
    ]
}
