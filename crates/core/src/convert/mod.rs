//! Batch image conversion.
//!
//! A request flows through these stages:
//!
//! 1. [`validate`](validate::validate) checks the request shape; a failure
//!    aborts the batch before any work.
//! 2. [`BatchAggregator`] walks the items, each one through [`ItemPipeline`].
//! 3. [`ItemPipeline`] extracts bytes ([`extract`](extract::extract)), then
//!    transcodes them ([`transcode`](encode::transcode)). Any failure drops
//!    the item and is reported to the [`ItemObserver`].
//! 4. [`codec`] turns the artifacts, or the request-level error, into the
//!    JSON envelope.
//!
//! # Example
//!
//! ```ignore
//! use pixshift_core::convert::{ConversionForm, FileInput, ImageConverter, ObserverSet};
//!
//! let converter = ImageConverter::new(&config.convert, Arc::new(ObserverSet::standard()));
//! let form = ConversionForm::new(
//!     vec![FileInput::from_bytes(Some("cat.png".into()), png_bytes)],
//!     Some("webp".to_string()),
//! );
//! let (status, envelope) = converter.handle(form).await;
//! ```

pub mod codec;
mod batch;
mod encode;
mod error;
mod extract;
mod observer;
mod pipeline;
mod types;
mod validate;

use std::sync::Arc;

use crate::config::ConvertConfig;

pub use batch::BatchAggregator;
pub use codec::{ArtifactDescriptor, ResponseEnvelope};
pub use encode::{decode, encode, transcode, EncodePolicy, LOSSY_QUALITY};
pub use error::{ConvertError, EncodeError, ExtractionError, ItemError, ValidationError};
pub use extract::{
    base_name, extract, BufferSource, ByteSource, Capabilities, ExtractionStrategy, FileInput,
    NoSource, RawSource, StreamSource,
};
pub use observer::{ItemObserver, MetricsObserver, ObserverSet, TracingObserver};
pub use pipeline::ItemPipeline;
pub use types::{
    ConversionForm, ConversionRequest, ConversionResult, ConvertedArtifact, EncodedImage,
    TargetFormat, UnknownFormat,
};
pub use validate::validate;

/// Entry point for one conversion request.
#[derive(Clone)]
pub struct ImageConverter {
    aggregator: BatchAggregator,
}

impl ImageConverter {
    pub fn new(config: &ConvertConfig, observer: Arc<dyn ItemObserver>) -> Self {
        let aggregator = BatchAggregator::new(ItemPipeline::new(observer))
            .with_max_concurrent(config.max_concurrent_items);
        Self { aggregator }
    }

    /// Validates the form and converts every item that can be converted.
    pub async fn convert(&self, form: ConversionForm) -> Result<ConversionResult, ConvertError> {
        let request = validate(form)?;
        Ok(self.aggregator.run(request).await)
    }

    /// Like [`convert`](Self::convert) but already shaped for the wire.
    pub async fn handle(&self, form: ConversionForm) -> (u16, ResponseEnvelope) {
        match self.convert(form).await {
            Ok(result) => (200, codec::encode_success(result)),
            Err(e) => codec::encode_error(&e),
        }
    }
}
