//! Image codec access.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Convert → WebP** | `image` decode + `webp` lossy encode |
//!
//! The module is split into:
//! - **Parameters**: [`Quality`] and [`ConvertParams`]
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ConversionReport, Dimensions, ImageBackend};
pub use params::{ConvertParams, Quality};
pub use rust_backend::RustBackend;
