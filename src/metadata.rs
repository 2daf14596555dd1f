//! Per-image metadata and layout report.
//!
//! For every logical image the generator resolves up to two files and derives
//! dimensions, orientation and a layout suggestion from them.
//!
//! ## Which images
//!
//! The report covers the sorted union of:
//! - every target base name in the rename mapping, and
//! - every base name found among converted (`.webp`) files.
//!
//! ## Resolution priority
//!
//! Each field is resolved independently, first available wins:
//!
//! - **Optimized path**: first converted file with the base name → None
//! - **Original path**: first original file with the base name → None
//! - **Dimensions**: optimized file → original file → unknown (0×0)
//! - **Byte size**: optimized file → original file → 0
//!
//! The converted file wins for dimensions because that is what the
//! presentation layer serves. When it exists but cannot be read, the original
//! is used instead and a warning is logged.
//!
//! ## Output shape
//!
//! ```json
//! "engine_hood": {
//!   "paths": {
//!     "optimized": "assets_optimized/landing/engine_hood.webp",
//!     "original": "assets/landing/engine_hood.jpg",
//!     "sourceUsedForDimensions": "optimized"
//!   },
//!   "width": 1920,
//!   "height": 1080,
//!   "bytes": 183422,
//!   "aspectRatio": 1.7778,
//!   "orientation": "landscape",
//!   "layout": { "rowSpan": 1, "colSpan": 2, "priority": "normal" }
//! }
//! ```

use crate::imaging::{Dimensions, ImageBackend};
use crate::layout::{self, LayoutSuggestion, Orientation};
use crate::mapping::{MappingDocument, MappingError, RenamePair};
use crate::naming;
use crate::scan::TreeIndex;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error(transparent)]
    Mapping(#[from] MappingError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Base name → entry, sorted by base name.
pub type Metadata = BTreeMap<String, MetadataEntry>;

/// Which file supplied the dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionSource {
    Optimized,
    Original,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPaths {
    pub optimized: Option<String>,
    pub original: Option<String>,
    pub source_used_for_dimensions: Option<DimensionSource>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataEntry {
    pub paths: EntryPaths,
    pub width: u32,
    pub height: u32,
    pub bytes: u64,
    pub aspect_ratio: Option<f64>,
    pub orientation: Orientation,
    pub layout: LayoutSuggestion,
}

impl MetadataEntry {
    /// Derive every computed field from resolved dimensions.
    pub fn from_dimensions(
        paths: EntryPaths,
        dimensions: Option<Dimensions>,
        bytes: u64,
    ) -> Self {
        let (width, height, aspect_ratio, orientation) = match dimensions {
            Some(Dimensions { width, height }) => (
                width,
                height,
                layout::aspect_ratio(width, height),
                layout::classify_orientation(width, height),
            ),
            None => (0, 0, None, Orientation::Unknown),
        };
        Self {
            paths,
            width,
            height,
            bytes,
            aspect_ratio,
            orientation,
            layout: layout::suggest_layout(width, height),
        }
    }
}

fn file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Dimensions from the optimized file, falling back to the original.
fn resolve_dimensions(
    backend: &impl ImageBackend,
    optimized: Option<&Path>,
    original: Option<&Path>,
) -> Option<(Dimensions, DimensionSource)> {
    let candidates = [
        (optimized, DimensionSource::Optimized),
        (original, DimensionSource::Original),
    ];
    candidates.into_iter().find_map(|(path, source)| {
        let path = path?;
        match backend.identify(path) {
            Ok(dims) => Some((dims, source)),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "could not read dimensions");
                None
            }
        }
    })
}

/// Build the entry for one base name.
pub fn resolve_entry(
    backend: &impl ImageBackend,
    optimized: Option<&Path>,
    original: Option<&Path>,
) -> MetadataEntry {
    let resolved = resolve_dimensions(backend, optimized, original);
    let bytes = optimized.or(original).map(file_size).unwrap_or(0);

    let paths = EntryPaths {
        optimized: optimized.map(|p| p.to_string_lossy().to_string()),
        original: original.map(|p| p.to_string_lossy().to_string()),
        source_used_for_dimensions: resolved.map(|(_, source)| source),
    };
    MetadataEntry::from_dimensions(paths, resolved.map(|(dims, _)| dims), bytes)
}

/// Build metadata for the union of mapping targets and converted base names.
pub fn build_metadata(
    backend: &impl ImageBackend,
    pairs: &[RenamePair],
    assets_dir: &Path,
    optimized_dir: &Path,
) -> Metadata {
    let converted = TreeIndex::build(optimized_dir, naming::OPTIMIZED_EXTENSIONS);
    let originals = TreeIndex::build(assets_dir, naming::ORIGINAL_EXTENSIONS);
    converted.warn_duplicates();
    originals.warn_duplicates();

    let names: BTreeSet<&str> = pairs
        .iter()
        .map(|p| p.new.as_str())
        .chain(converted.base_names())
        .collect();

    names
        .into_iter()
        .map(|base| {
            let entry = resolve_entry(backend, converted.first(base), originals.first(base));
            (base.to_string(), entry)
        })
        .collect()
}

/// Write the report as pretty JSON, creating parent directories.
pub fn write_metadata(path: &Path, metadata: &Metadata) -> Result<(), MetadataError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(metadata)?)?;
    Ok(())
}

/// Store the report under the mapping document's `metadata` key and rewrite
/// the document in place.
pub fn merge_into_mapping(mapping_path: &Path, metadata: &Metadata) -> Result<(), MetadataError> {
    let mut doc = MappingDocument::load(mapping_path)?;
    doc.merge_metadata(serde_json::to_value(metadata)?);
    doc.save(mapping_path)?;
    Ok(())
}
