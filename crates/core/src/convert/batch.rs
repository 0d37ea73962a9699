//! Batch aggregation over the item pipeline.

use futures::future;
use futures::stream::{self, StreamExt};

use super::pipeline::ItemPipeline;
use super::types::{ConversionRequest, ConversionResult};

/// Drives every item of a validated request and keeps the successes.
///
/// Items are polled through a bounded window of `max_concurrent` in-flight
/// conversions. Results come back in input order, so with any window size the
/// artifact order is the input order minus failed items.
#[derive(Clone)]
pub struct BatchAggregator {
    pipeline: ItemPipeline,
    max_concurrent: usize,
}

impl BatchAggregator {
    /// Sequential aggregator (one item at a time).
    pub fn new(pipeline: ItemPipeline) -> Self {
        Self {
            pipeline,
            max_concurrent: 1,
        }
    }

    /// Sets the number of items allowed in flight. Zero is treated as one.
    pub fn with_max_concurrent(mut self, max: usize) -> Self {
        self.max_concurrent = max.max(1);
        self
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Processes every item. Never fails: an item that cannot be converted
    /// is left out of the result.
    pub async fn run(&self, request: ConversionRequest) -> ConversionResult {
        let submitted = request.len();
        let (files, format) = request.into_parts();

        let artifacts: Vec<_> = stream::iter(files.into_iter().enumerate())
            .map(|(index, input)| self.pipeline.run(index, input, format))
            .buffered(self.max_concurrent)
            .filter_map(future::ready)
            .collect()
            .await;

        self.pipeline
            .observer()
            .batch_finished(format, submitted, artifacts.len());

        ConversionResult {
            artifacts,
            submitted,
        }
    }
}
