//! Per-item conversion: extract, transcode, name.
//!
//! This is the failure-isolation boundary. Whatever goes wrong with one item
//! is reported to the observer and turned into "no artifact"; it never
//! reaches the batch.

use std::sync::Arc;

use tracing::debug;

use super::encode::transcode;
use super::error::{EncodeError, ItemError};
use super::extract::{base_name, extract, ByteSource, FileInput};
use super::observer::ItemObserver;
use super::types::{ConvertedArtifact, TargetFormat};

/// Runs one item through extraction and encoding.
#[derive(Clone)]
pub struct ItemPipeline {
    observer: Arc<dyn ItemObserver>,
}

impl ItemPipeline {
    pub fn new(observer: Arc<dyn ItemObserver>) -> Self {
        Self { observer }
    }

    pub fn observer(&self) -> &dyn ItemObserver {
        self.observer.as_ref()
    }

    /// Converts the item at `index`, or returns `None` if it failed.
    pub async fn run(
        &self,
        index: usize,
        input: FileInput,
        format: TargetFormat,
    ) -> Option<ConvertedArtifact> {
        debug!(
            index,
            strategy = input.strategy().as_str(),
            format = %format,
            "Extracting item"
        );
        let (name, source) = input.into_parts();

        match Self::process(index, name.as_deref(), source, format).await {
            Ok(artifact) => {
                self.observer
                    .item_converted(index, &artifact.name, format, artifact.payload.len());
                Some(artifact)
            }
            Err(e) => {
                self.observer
                    .item_skipped(index, name.as_deref(), format, &e);
                None
            }
        }
    }

    async fn process(
        index: usize,
        name: Option<&str>,
        source: Box<dyn ByteSource>,
        format: TargetFormat,
    ) -> Result<ConvertedArtifact, ItemError> {
        let bytes = extract(source).await?;

        // CPU-bound; keep it off the async workers.
        let payload = tokio::task::spawn_blocking(move || transcode(&bytes, format))
            .await
            .map_err(|e| EncodeError::Worker(e.to_string()))??;

        Ok(ConvertedArtifact {
            name: format!("{}.{}", base_name(name, index), format.extension()),
            payload,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixtures, RecordingObserver};

    fn pipeline() -> (ItemPipeline, Arc<RecordingObserver>) {
        let recorder = Arc::new(RecordingObserver::new());
        (ItemPipeline::new(recorder.clone()), recorder)
    }

    #[tokio::test]
    async fn test_valid_item_produces_artifact() {
        let (pipeline, recorder) = pipeline();
        let input = FileInput::from_bytes(Some("a.png".into()), fixtures::png_bytes(1, 1));

        let artifact = pipeline.run(0, input, TargetFormat::Jpg).await.unwrap();

        assert_eq!(artifact.name, "a.jpg");
        assert_eq!(artifact.payload.format, TargetFormat::Jpg);
        assert!(!artifact.payload.is_empty());
        let converted = recorder.converted();
        assert_eq!(converted.len(), 1);
        assert_eq!(converted[0].name, "a.jpg");
        assert_eq!(converted[0].bytes, artifact.payload.len());
        assert!(recorder.skipped().is_empty());
    }

    #[tokio::test]
    async fn test_unnamed_item_uses_position() {
        let (pipeline, _) = pipeline();
        let input = FileInput::from_bytes(None, fixtures::png_bytes(1, 1));

        let artifact = pipeline.run(2, input, TargetFormat::Webp).await.unwrap();
        assert_eq!(artifact.name, "image-3.webp");
    }

    #[tokio::test]
    async fn test_corrupt_item_is_skipped_and_reported() {
        let (pipeline, recorder) = pipeline();
        let input = FileInput::from_bytes(Some("b.png".into()), fixtures::corrupt_bytes());

        assert!(pipeline.run(1, input, TargetFormat::Webp).await.is_none());

        let skipped = recorder.skipped();
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].index, 1);
        assert_eq!(skipped[0].name.as_deref(), Some("b.png"));
        assert_eq!(skipped[0].stage, "encode");
    }

    #[tokio::test]
    async fn test_empty_item_is_skipped_at_extraction() {
        let (pipeline, recorder) = pipeline();
        let input = FileInput::from_bytes(Some("empty.png".into()), Vec::<u8>::new());

        assert!(pipeline.run(0, input, TargetFormat::Png).await.is_none());
        assert_eq!(recorder.skipped()[0].stage, "extract");
    }

    #[tokio::test]
    async fn test_streamed_item_converts() {
        let (pipeline, _) = pipeline();
        let png = fixtures::png_bytes(3, 3);
        let chunks = png
            .chunks(7)
            .map(bytes::Bytes::copy_from_slice)
            .collect::<Vec<_>>();
        let input = FileInput::from_chunks(Some("s.png".into()), chunks);

        let artifact = pipeline.run(0, input, TargetFormat::Png).await.unwrap();
        assert_eq!(artifact.name, "s.png");
    }
}
