//! Image codec backend trait and shared types.
//!
//! The [`ImageBackend`] trait covers the two things the pipeline asks of an
//! image codec: read pixel dimensions, and convert one file to WebP.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend). Tests use a mock that
//! records calls and returns canned dimensions.

use super::params::ConvertParams;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {path}: {reason}")]
    Decode { path: String, reason: String },
    #[error("Failed to encode {path}: {reason}")]
    Encode { path: String, reason: String },
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// What a successful conversion produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionReport {
    /// The output carries an alpha channel.
    pub has_alpha: bool,
    pub dimensions: Dimensions,
}

/// Trait for image codec backends.
pub trait ImageBackend {
    /// Read pixel dimensions without decoding the full image.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode `params.source` and write a lossy WebP to `params.output`.
    ///
    /// Images with transparency keep an alpha channel; everything else is
    /// written as three-channel colour.
    fn convert(&self, params: &ConvertParams) -> Result<ConversionReport, BackendError>;
}
