//! Production backend built on the `image` and `webp` crates.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `ImageReader::into_dimensions` (header only, format sniffed) |
//! | Decode (JPEG, PNG, WebP) | `image::ImageReader` |
//! | Transparency check | `DynamicImage::color().has_alpha()` |
//! | Encode → lossy WebP | `webp::Encoder` (libwebp) |
//!
//! Palette PNGs with a `tRNS` chunk are expanded to RGBA by the PNG decoder,
//! so they are reported as transparent like any other alpha-carrying image.
//! Images without transparency are flattened to RGB8 by dropping the channel;
//! no background compositing takes place.

use super::backend::{BackendError, ConversionReport, Dimensions, ImageBackend};
use super::params::ConvertParams;
use image::{DynamicImage, ImageReader};
use std::path::Path;

/// Pure-pipeline backend using the `image` crate for decoding and libwebp for
/// lossy encoding.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_error(path: &Path, reason: impl std::fmt::Display) -> BackendError {
    BackendError::Decode {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Load and decode an image from disk, sniffing the format from content.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|e| decode_error(path, e))
}

/// Encode as lossy WebP, keeping alpha only when asked to.
fn encode_webp(
    img: &DynamicImage,
    keep_alpha: bool,
    quality: u8,
    output: &Path,
) -> Result<(), BackendError> {
    let (width, height) = (img.width(), img.height());
    let encoded = if keep_alpha {
        let rgba = img.to_rgba8();
        webp::Encoder::from_rgba(rgba.as_raw(), width, height)
            .encode_simple(false, quality as f32)
    } else {
        let rgb = img.to_rgb8();
        webp::Encoder::from_rgb(rgb.as_raw(), width, height).encode_simple(false, quality as f32)
    }
    .map_err(|e| BackendError::Encode {
        path: output.display().to_string(),
        reason: format!("{e:?}"),
    })?;

    std::fs::write(output, &*encoded)?;
    Ok(())
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = ImageReader::open(path)?
            .with_guessed_format()?
            .into_dimensions()
            .map_err(|e| decode_error(path, e))?;
        Ok(Dimensions { width, height })
    }

    fn convert(&self, params: &ConvertParams) -> Result<ConversionReport, BackendError> {
        let img = load_image(&params.source)?;
        let has_alpha = img.color().has_alpha();
        encode_webp(&img, has_alpha, params.quality.value(), &params.output)?;
        Ok(ConversionReport {
            has_alpha,
            dimensions: Dimensions {
                width: img.width(),
                height: img.height(),
            },
        })
    }
}
