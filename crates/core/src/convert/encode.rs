//! Decoding arbitrary image bytes and re-encoding them into a target format.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::codecs::webp::WebPEncoder;
use image::{ColorType, DynamicImage};
use tracing::debug;

use super::error::EncodeError;
use super::types::{EncodedImage, TargetFormat};

/// Quality applied to every lossy encode. Not configurable per request.
pub const LOSSY_QUALITY: u8 = 85;

/// Fixed encoding policy of a target format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodePolicy {
    Lossy { quality: u8 },
    Lossless,
}

impl EncodePolicy {
    /// Encoder quality; lossless policies encode at full quality.
    pub fn quality(&self) -> u8 {
        match self {
            Self::Lossy { quality } => *quality,
            Self::Lossless => 100,
        }
    }
}

impl TargetFormat {
    pub fn policy(&self) -> EncodePolicy {
        match self {
            Self::Jpg => EncodePolicy::Lossy {
                quality: LOSSY_QUALITY,
            },
            // image only ships a lossless WebP encoder
            Self::Png | Self::Webp => EncodePolicy::Lossless,
        }
    }
}

/// Decodes bytes of any supported input format, sniffing the format from
/// the content rather than trusting the declared name.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, EncodeError> {
    image::load_from_memory(bytes).map_err(EncodeError::Decode)
}

/// Encodes a decoded image into the target format.
pub fn encode(img: &DynamicImage, format: TargetFormat) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Vec::new();
    let written = match format {
        // JPEG has no alpha channel
        TargetFormat::Jpg => {
            let quality = format.policy().quality();
            img.to_rgb8()
                .write_with_encoder(JpegEncoder::new_with_quality(&mut buf, quality))
        }
        TargetFormat::Png => {
            let encoder = PngEncoder::new_with_quality(
                &mut buf,
                CompressionType::Default,
                FilterType::Adaptive,
            );
            match img.color() {
                ColorType::Rgb32F | ColorType::Rgba32F => {
                    DynamicImage::ImageRgba16(img.to_rgba16()).write_with_encoder(encoder)
                }
                _ => img.write_with_encoder(encoder),
            }
        }
        TargetFormat::Webp => {
            let encoder = WebPEncoder::new_lossless(&mut buf);
            if img.color().has_alpha() {
                img.to_rgba8().write_with_encoder(encoder)
            } else {
                img.to_rgb8().write_with_encoder(encoder)
            }
        }
    };
    written.map_err(EncodeError::Encode)?;
    Ok(buf)
}

/// Decodes `bytes` and re-encodes them into `format`.
pub fn transcode(bytes: &[u8], format: TargetFormat) -> Result<EncodedImage, EncodeError> {
    let img = decode(bytes)?;
    let encoded = encode(&img, format)?;
    debug!(
        width = img.width(),
        height = img.height(),
        input_bytes = bytes.len(),
        output_bytes = encoded.len(),
        format = %format,
        "Transcoded image"
    );
    Ok(EncodedImage::new(format, encoded))
}
