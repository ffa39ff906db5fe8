use crate::constants::{
    JPEG_MAX_QUALITY, OXIPNG_PRESET, WEBP_MAX_METHOD, WEBP_MAX_QUALITY, ZOPFLI_ITERATIONS,
};
use crate::error::{Result, SqueezeError};
use crate::formats::{detect_format, SourceFormat};
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::{ColorType, DynamicImage, ImageError, ImageFormat};
use mozjpeg::{ColorSpace, Compress};
use oxipng::{Deflaters, Options};
use std::fs;
use std::io::Cursor;
use std::num::NonZeroU8;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct ReencodeOptions {
    /// Use the zopfli deflater for the PNG optimization pass. Much slower,
    /// usually a few percent smaller.
    pub zopfli: bool,
}

/// An image file read into memory together with its detected format.
#[derive(Debug, Clone)]
pub struct ImageAsset {
    pub path: PathBuf,
    pub format: SourceFormat,
    pub bytes: Vec<u8>,
}

impl ImageAsset {
    pub fn open(path: &Path) -> Result<Self> {
        validate_file_exists(path)?;
        let bytes = fs::read(path)?;
        Self::from_bytes(path, bytes)
    }

    pub fn from_bytes(path: &Path, bytes: Vec<u8>) -> Result<Self> {
        let format = detect_format(&bytes)?;
        Ok(Self {
            path: path.to_path_buf(),
            format,
            bytes,
        })
    }

    pub fn decode(&self) -> Result<DynamicImage> {
        let img = image::load_from_memory_with_format(&self.bytes, self.format.to_image_format())?;
        Ok(img)
    }
}

/// Re-encoded image bytes, ready to hand to the remote optimizer.
#[derive(Debug, Clone)]
pub struct CompressedPayload {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
    pub lossless: bool,
}

pub fn validate_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(SqueezeError::FileNotFound(path.to_path_buf()));
    }
    Ok(())
}

/// Re-encode an asset according to the policy for its detected format:
/// JPEG at maximum quality, PNG through oxipng, WebP lossless at maximum
/// effort (lossy if the encoder rejects lossless), anything else in its own
/// format or PNG when that format has no encoder.
pub fn reencode(asset: &ImageAsset, options: &ReencodeOptions) -> Result<CompressedPayload> {
    let img = asset.decode()?;
    debug!("Re-encoding {:?} as {}", asset.path, asset.format);

    match asset.format {
        SourceFormat::Jpeg => encode_jpeg(&img),
        SourceFormat::Png => encode_png(&img, options),
        SourceFormat::WebP => encode_webp(&img),
        SourceFormat::Other(format) => encode_native_or_png(&img, format, options),
    }
}

/// JPEG at maximum quality through mozjpeg with optimized Huffman coding.
pub fn encode_jpeg(img: &DynamicImage) -> Result<CompressedPayload> {
    let (color_space, samples) = if img.color() == ColorType::L8 {
        (ColorSpace::JCS_GRAYSCALE, img.to_luma8().into_raw())
    } else {
        (ColorSpace::JCS_RGB, img.to_rgb8().into_raw())
    };
    let (width, height) = (img.width() as usize, img.height() as usize);

    // mozjpeg reports libjpeg errors by unwinding
    let encoded = panic::catch_unwind(AssertUnwindSafe(|| -> std::io::Result<Vec<u8>> {
        let mut comp = Compress::new(color_space);
        comp.set_size(width, height);
        comp.set_quality(JPEG_MAX_QUALITY as f32);
        comp.set_optimize_coding(true);

        let mut writer = comp.start_compress(Vec::new())?;
        writer.write_scanlines(&samples)?;
        writer.finish()
    }));

    let bytes = match encoded {
        Ok(Ok(bytes)) => bytes,
        Ok(Err(e)) => return Err(SqueezeError::JpegEncoding(e.to_string())),
        Err(_) => return Err(SqueezeError::JpegEncoding("encoder aborted".to_string())),
    };

    Ok(CompressedPayload {
        bytes,
        format: ImageFormat::Jpeg,
        lossless: false,
    })
}

pub fn encode_png(img: &DynamicImage, options: &ReencodeOptions) -> Result<CompressedPayload> {
    let mut raw = Vec::new();
    let encoder = PngEncoder::new_with_quality(&mut raw, CompressionType::Best, PngFilterType::Adaptive);
    img.write_with_encoder(encoder)?;

    let mut oxipng_options = Options::from_preset(OXIPNG_PRESET);
    if options.zopfli {
        oxipng_options.deflate = Deflaters::Zopfli {
            iterations: NonZeroU8::new(ZOPFLI_ITERATIONS).unwrap_or(NonZeroU8::MIN),
        };
    }

    let bytes = oxipng::optimize_from_memory(&raw, &oxipng_options)
        .map_err(|e| SqueezeError::PngOptimization(e.to_string()))?;

    Ok(CompressedPayload {
        bytes,
        format: ImageFormat::Png,
        lossless: true,
    })
}

pub fn encode_webp(img: &DynamicImage) -> Result<CompressedPayload> {
    let rgba = img.to_rgba8();
    let encoder = webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height());

    let mut config = webp::WebPConfig::new()
        .map_err(|_| SqueezeError::WebpEncoding("failed to initialise encoder config".to_string()))?;
    config.lossless = 1;
    config.exact = 1;
    config.quality = WEBP_MAX_QUALITY;
    config.method = WEBP_MAX_METHOD;

    match encoder.encode_advanced(&config) {
        Ok(memory) => Ok(CompressedPayload {
            bytes: memory.to_vec(),
            format: ImageFormat::WebP,
            lossless: true,
        }),
        Err(e) => {
            debug!("Lossless WebP rejected ({:?}), falling back to lossy", e);
            config.lossless = 0;
            config.exact = 0;
            let memory = encoder
                .encode_advanced(&config)
                .map_err(|e| SqueezeError::WebpEncoding(format!("{:?}", e)))?;
            Ok(CompressedPayload {
                bytes: memory.to_vec(),
                format: ImageFormat::WebP,
                lossless: false,
            })
        }
    }
}

/// Save in the image's own format; fall back to optimized PNG when the
/// backend has no encoder for it.
pub fn encode_native_or_png(
    img: &DynamicImage,
    format: ImageFormat,
    options: &ReencodeOptions,
) -> Result<CompressedPayload> {
    let mut buffer = Cursor::new(Vec::new());
    match img.write_to(&mut buffer, format) {
        Ok(()) => Ok(CompressedPayload {
            bytes: buffer.into_inner(),
            format,
            lossless: false,
        }),
        Err(ImageError::Unsupported(e)) => {
            debug!("Cannot encode {:?} ({}), falling back to PNG", format, e);
            encode_png(img, options)
        }
        Err(e) => Err(e.into()),
    }
}
