//! Error types for the convert module.
//!
//! Request-level failures ([`ConvertError`]) abort the whole batch. Item-level
//! failures ([`ItemError`]) are contained by the item pipeline and only ever
//! reach the observer.

use thiserror::Error;

/// The request shape is not acceptable; nothing was processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The `files` set was missing or empty.
    #[error("No files provided")]
    NoFiles,

    /// The `targetFormat` field was missing or not a supported identifier.
    #[error("Invalid target format")]
    InvalidTargetFormat { value: Option<String> },
}

/// No extraction strategy produced usable bytes for an item.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The input exposes no byte-access capability at all.
    #[error("input exposes no readable content")]
    NoStrategy,

    /// Extraction succeeded but produced zero bytes.
    #[error("input is empty")]
    Empty,

    /// Pulling from a chunked source failed part-way.
    #[error("failed to read input stream: {0}")]
    Stream(#[from] std::io::Error),

    /// The raw value could not be reinterpreted as bytes.
    #[error("failed to coerce raw value: {reason}")]
    Coercion { reason: String },
}

impl ExtractionError {
    pub fn coercion(reason: impl Into<String>) -> Self {
        Self::Coercion {
            reason: reason.into(),
        }
    }
}

/// Bytes could not be decoded as an image or re-encoded.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    /// The blocking encode task panicked or was cancelled.
    #[error("encode worker failed: {0}")]
    Worker(String),
}

/// Failure of a single item, tagged with the stage that failed.
#[derive(Debug, Error)]
pub enum ItemError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl ItemError {
    /// Stage label used in logs and metrics.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Extraction(_) => "extract",
            Self::Encode(_) => "encode",
        }
    }
}

/// Request-level failure.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Any fault outside the per-item boundary. The detail is for logs only.
    #[error("Internal server error")]
    Unexpected { detail: String },
}

impl ConvertError {
    pub fn unexpected(detail: impl Into<String>) -> Self {
        Self::Unexpected {
            detail: detail.into(),
        }
    }

    /// HTTP status classification for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Unexpected { .. } => 500,
        }
    }
}
