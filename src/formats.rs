//! Content-based image format detection.
//!
//! The extension only decides whether a file enters the pipeline; the
//! re-encoding policy is chosen from the format the bytes actually carry,
//! so a PNG saved as `photo.jpg` is still treated as a PNG.
use crate::error::Result;
use image::ImageFormat;
use std::fmt;

/// Format detected from an image's magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Jpeg,
    Png,
    WebP,
    /// Any other format the decoder recognizes (GIF, BMP, TIFF, ...)
    Other(ImageFormat),
}

impl SourceFormat {
    pub fn from_image_format(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Jpeg => SourceFormat::Jpeg,
            ImageFormat::Png => SourceFormat::Png,
            ImageFormat::WebP => SourceFormat::WebP,
            other => SourceFormat::Other(other),
        }
    }

    /// Convert to the image crate's ImageFormat
    pub fn to_image_format(&self) -> ImageFormat {
        match self {
            SourceFormat::Jpeg => ImageFormat::Jpeg,
            SourceFormat::Png => ImageFormat::Png,
            SourceFormat::WebP => ImageFormat::WebP,
            SourceFormat::Other(format) => *format,
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::Jpeg => write!(f, "JPEG"),
            SourceFormat::Png => write!(f, "PNG"),
            SourceFormat::WebP => write!(f, "WebP"),
            SourceFormat::Other(format) => write!(f, "{:?}", format),
        }
    }
}

/// Detect the format of an encoded image from its leading bytes.
pub fn detect_format(bytes: &[u8]) -> Result<SourceFormat> {
    let format = image::guess_format(bytes)?;
    Ok(SourceFormat::from_image_format(format))
}
