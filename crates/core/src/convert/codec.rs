//! Wire envelope for conversion responses.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use super::error::ConvertError;
use super::types::{ConversionResult, ConvertedArtifact, EncodedImage};

/// One converted file as sent to the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactDescriptor {
    pub name: String,
    /// `data:<media type>;base64,<payload>`
    pub url: String,
}

impl From<ConvertedArtifact> for ArtifactDescriptor {
    fn from(artifact: ConvertedArtifact) -> Self {
        Self {
            url: data_url(&artifact.payload),
            name: artifact.name,
        }
    }
}

/// Response body of the convert endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseEnvelope {
    Success {
        success: bool,
        files: Vec<ArtifactDescriptor>,
    },
    Error {
        error: String,
    },
}

impl ResponseEnvelope {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { success: true, .. })
    }
}

/// Renders encoded bytes as a self-contained inline resource.
pub fn data_url(image: &EncodedImage) -> String {
    format!(
        "data:{};base64,{}",
        image.media_type(),
        STANDARD.encode(&image.bytes)
    )
}

/// Success envelope for a processed batch, even when nothing converted.
pub fn encode_success(result: ConversionResult) -> ResponseEnvelope {
    ResponseEnvelope::Success {
        success: true,
        files: result.artifacts.into_iter().map(Into::into).collect(),
    }
}

/// Status code and error envelope for a request-level failure.
pub fn encode_error(error: &ConvertError) -> (u16, ResponseEnvelope) {
    (
        error.status_code(),
        ResponseEnvelope::Error {
            error: error.to_string(),
        },
    )
}
