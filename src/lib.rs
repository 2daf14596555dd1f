//! # Asset Pipeline
//!
//! Batch tools for the image assets of a static site. Original rasters live
//! in one tree, their WebP conversions in a parallel tree, and a JSON mapping
//! document ties human-chosen names to camera file names.
//!
//! # Architecture: Four Independent Tools
//!
//! Each tool is a stateless batch run over the filesystem. None of them keeps
//! state between runs; they only share conventions:
//!
//! ```text
//! convert    assets/            →  assets_optimized/        (png/jpg → webp)
//! rename     mapping.json       →  both trees renamed       (old base → new base)
//! mirror     assets_optimized/  →  assets/ reorganized      (same subdirectories)
//! metadata   both trees         →  image_metadata.json      (dimensions + layout)
//! ```
//!
//! Files are joined across the two trees by **base name**, the file name
//! without its extension: `assets/landing/IMG_2041.JPG` and
//! `assets_optimized/landing/IMG_2041.webp` are the same logical image.
//!
//! Rename and mirror work in two phases, plan then apply, so a dry run prints
//! exactly what a real run would do.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`naming`] | Base name / extension helpers and the accepted extension sets |
//! | [`scan`] | Sorted tree walk and per-base-name index of a tree |
//! | [`imaging`] | Codec seam: read dimensions, encode WebP |
//! | [`convert`] | Image converter: plan and run conversions |
//! | [`mapping`] | Rename mapping document: load, read pairs, merge metadata, save |
//! | [`fileops`] | Plan-then-apply moves with dry-run and collision handling |
//! | [`rename`] | Mapping-driven renamer planning |
//! | [`mirror`] | Structure mirror planning |
//! | [`layout`] | Orientation and grid-span rules (pure) |
//! | [`metadata`] | Metadata report: resolution, JSON output, merge into mapping |
//! | [`config`] | `asset-pipeline.toml` loading, validation, merging |
//! | [`output`] | CLI output formatting |
//!
//! # Determinism
//!
//! Trees are always walked in sorted depth-first order, so "the first file
//! with this base name" means the same file on every machine. Metadata keys
//! are sorted by base name.

pub mod config;
pub mod convert;
pub mod fileops;
pub mod imaging;
pub mod layout;
pub mod mapping;
pub mod metadata;
pub mod mirror;
pub mod naming;
pub mod output;
pub mod rename;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
