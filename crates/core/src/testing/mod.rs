//! Testing utilities: observer doubles and in-memory image fixtures.
//!
//! # Example
//!
//! ```rust,ignore
//! use pixshift_core::testing::{fixtures, RecordingObserver};
//!
//! let recorder = Arc::new(RecordingObserver::new());
//! let converter = ImageConverter::new(&ConvertConfig::default(), recorder.clone());
//!
//! // ... run a batch ...
//!
//! assert_eq!(recorder.skipped().len(), 1);
//! ```

mod recording_observer;

pub use recording_observer::{RecordedConversion, RecordedSkip, RecordingObserver};

/// Test fixtures and helper functions.
pub mod fixtures {
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
    use std::io::Cursor;

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 37 % 256) as u8, (y * 59 % 256) as u8, 128])
        })
    }

    fn write(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, format)
            .expect("in-memory fixture encode");
        buf.into_inner()
    }

    /// An opaque RGB PNG.
    pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        write(DynamicImage::ImageRgb8(gradient(width, height)), ImageFormat::Png)
    }

    /// A half-transparent RGBA PNG.
    pub fn rgba_png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([200, 10, 10, 128]));
        write(DynamicImage::ImageRgba8(img), ImageFormat::Png)
    }

    /// A baseline JPEG.
    pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
        write(DynamicImage::ImageRgb8(gradient(width, height)), ImageFormat::Jpeg)
    }

    /// A lossless WebP.
    pub fn webp_bytes(width: u32, height: u32) -> Vec<u8> {
        write(DynamicImage::ImageRgb8(gradient(width, height)), ImageFormat::WebP)
    }

    /// Bytes that no image decoder accepts.
    pub fn corrupt_bytes() -> Vec<u8> {
        b"\x89PNG\r\n\x1a\nthis is not really a png".to_vec()
    }
}
