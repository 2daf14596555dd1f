//! The rename mapping document (`mapping.json`).
//!
//! A JSON object pairing old base names with new ones:
//!
//! ```json
//! {
//!   "IMG_2041": "engine_hood",
//!   "IMG_2042": "dashboard",
//!   "metadata": { "engine_hood": { "width": 1920, ... } }
//! }
//! ```
//!
//! Only string→string entries are rename pairs. Anything else (notably the
//! reserved `metadata` key written by the metadata generator) is carried
//! through untouched. Keys keep their authored order when the document is
//! rewritten.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Top-level key that holds merged image metadata.
pub const METADATA_KEY: &str = "metadata";

#[derive(Error, Debug)]
pub enum MappingError {
    #[error("Mapping file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("{} must contain a JSON object of {{ old_base: new_base }}", .0.display())]
    NotAnObject(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error in mapping file: {0}")]
    Json(#[from] serde_json::Error),
}

/// One old→new base-name pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePair {
    pub old: String,
    pub new: String,
}

/// A parsed mapping document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappingDocument {
    entries: Map<String, Value>,
}

impl MappingDocument {
    /// Load and validate a mapping file.
    pub fn load(path: &Path) -> Result<Self, MappingError> {
        if !path.is_file() {
            return Err(MappingError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content, path)
    }

    /// Parse a mapping document from JSON text.
    pub fn parse(content: &str) -> Result<Self, MappingError> {
        Self::from_json(content, Path::new("mapping document"))
    }

    fn from_json(content: &str, origin: &Path) -> Result<Self, MappingError> {
        match serde_json::from_str::<Value>(content)? {
            Value::Object(entries) => Ok(Self { entries }),
            _ => Err(MappingError::NotAnObject(origin.to_path_buf())),
        }
    }

    /// String→string entries in document order.
    pub fn rename_pairs(&self) -> Vec<RenamePair> {
        self.entries
            .iter()
            .filter_map(|(old, new)| {
                new.as_str().map(|new| RenamePair {
                    old: old.clone(),
                    new: new.to_string(),
                })
            })
            .collect()
    }

    /// Replace the reserved metadata entry, leaving every other key in place.
    pub fn merge_metadata(&mut self, metadata: Value) {
        self.entries.insert(METADATA_KEY.to_string(), metadata);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn to_json_pretty(&self) -> Result<String, MappingError> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    /// Rewrite the document in place as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), MappingError> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}
