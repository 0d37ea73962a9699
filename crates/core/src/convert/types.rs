//! Types for the convert module.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::extract::FileInput;

/// Output encoding selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetFormat {
    /// JPEG, lossy
    Jpg,
    /// PNG, lossless
    Png,
    /// WebP
    Webp,
}

impl TargetFormat {
    /// All supported target formats.
    pub const ALL: [TargetFormat; 3] = [Self::Jpg, Self::Png, Self::Webp];

    /// Returns the wire identifier, which doubles as the file extension.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jpg => "jpg",
            Self::Png => "png",
            Self::Webp => "webp",
        }
    }

    /// Returns the canonical file extension for this format.
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    /// Returns the media type tag used in inline data resources.
    ///
    /// This is `image/<identifier>` verbatim, so jpg yields `image/jpg`.
    pub fn media_type(&self) -> &'static str {
        match self {
            Self::Jpg => "image/jpg",
            Self::Png => "image/png",
            Self::Webp => "image/webp",
        }
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the supported identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFormat(pub String);

impl FromStr for TargetFormat {
    type Err = UnknownFormat;

    /// Parses the exact wire identifier; no aliases, no case folding.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jpg" => Ok(Self::Jpg),
            "png" => Ok(Self::Png),
            "webp" => Ok(Self::Webp),
            other => Err(UnknownFormat(other.to_string())),
        }
    }
}

/// Unvalidated request shape, as assembled from the wire.
#[derive(Default)]
pub struct ConversionForm {
    /// Every `files` entry, in submission order.
    pub files: Vec<FileInput>,
    /// The raw `targetFormat` value, if the field was present.
    pub target_format: Option<String>,
}

impl ConversionForm {
    pub fn new(files: Vec<FileInput>, target_format: Option<String>) -> Self {
        Self {
            files,
            target_format,
        }
    }
}

/// A validated batch: at least one file and a supported target format.
pub struct ConversionRequest {
    pub(crate) files: Vec<FileInput>,
    pub(crate) target_format: TargetFormat,
}

impl ConversionRequest {
    pub fn target_format(&self) -> TargetFormat {
        self.target_format
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub(crate) fn into_parts(self) -> (Vec<FileInput>, TargetFormat) {
        (self.files, self.target_format)
    }
}

/// Encoded image bytes together with their media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub format: TargetFormat,
    pub bytes: Bytes,
}

impl EncodedImage {
    pub fn new(format: TargetFormat, bytes: impl Into<Bytes>) -> Self {
        Self {
            format,
            bytes: bytes.into(),
        }
    }

    pub fn media_type(&self) -> &'static str {
        self.format.media_type()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// One successfully converted item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedArtifact {
    /// Base name of the source plus the target extension.
    pub name: String,
    pub payload: EncodedImage,
}

/// Outcome of a batch that passed validation.
#[derive(Debug, Clone, Default)]
pub struct ConversionResult {
    /// Successful artifacts in completion order.
    pub artifacts: Vec<ConvertedArtifact>,
    /// Number of items submitted in the batch.
    pub submitted: usize,
}

impl ConversionResult {
    /// Number of submitted items that produced no artifact.
    pub fn skipped(&self) -> usize {
        self.submitted.saturating_sub(self.artifacts.len())
    }

    /// Whether every submitted item produced an artifact.
    pub fn is_complete(&self) -> bool {
        self.artifacts.len() == self.submitted
    }
}
