//! Pipeline configuration.
//!
//! Handles loading, validating, and merging `asset-pipeline.toml`. Stock
//! defaults are the base layer; a user config file overrides any subset of
//! them; command-line flags override both.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [paths]
//! assets = "assets"                          # Original images
//! optimized = "assets_optimized"             # Converted WebP tree
//! mapping = "scripts/mapping.json"           # Rename mapping document
//! metadata = "scripts/image_metadata.json"   # Metadata report
//!
//! [convert]
//! quality = 80                               # WebP quality (0-100)
//! # output = "assets_optimized"              # Defaults to paths.optimized
//! ```
//!
//! Unknown keys are rejected to catch typos early. The layout thresholds are
//! fixed and cannot be configured.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "asset-pipeline.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Pipeline configuration loaded from `asset-pipeline.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Where the trees and documents live.
    pub paths: PathsConfig,
    /// Image converter settings.
    pub convert: ConvertConfig,
}

impl PipelineConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.convert.quality > 100 {
            return Err(ConfigError::Validation(
                "convert.quality must be 0-100".into(),
            ));
        }
        let paths = [
            ("paths.assets", &self.paths.assets),
            ("paths.optimized", &self.paths.optimized),
            ("paths.mapping", &self.paths.mapping),
            ("paths.metadata", &self.paths.metadata),
        ];
        for (key, path) in paths {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        if self
            .convert
            .output
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            return Err(ConfigError::Validation(
                "convert.output must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Directory converted files are written to.
    pub fn convert_output(&self) -> &Path {
        self.convert.output.as_deref().unwrap_or(&self.paths.optimized)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    pub assets: PathBuf,
    pub optimized: PathBuf,
    pub mapping: PathBuf,
    pub metadata: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            assets: PathBuf::from("assets"),
            optimized: PathBuf::from("assets_optimized"),
            mapping: PathBuf::from("scripts/mapping.json"),
            metadata: PathBuf::from("scripts/image_metadata.json"),
        }
    }
}

/// Image converter settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertConfig {
    /// WebP encoding quality (0 = worst, 100 = best).
    pub quality: u32,
    /// Output directory; falls back to `paths.optimized` when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            quality: 80,
            output: None,
        }
    }
}

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(PipelineConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<PipelineConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: PipelineConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, falling back to stock defaults when it is absent.
pub fn load_config(path: &Path) -> Result<PipelineConfig, ConfigError> {
    let overlay = load_raw_config(path)?;
    if overlay.is_some() {
        tracing::debug!(path = %path.display(), "loaded config file");
    }
    resolve_config(stock_defaults_value()?, overlay)
}

/// Returns a fully-commented stock config with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Asset Pipeline Configuration
# ============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Command-line flags override these values.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Paths
# ---------------------------------------------------------------------------
[paths]
# Tree of original raster images (png, jpg, jpeg).
assets = "assets"

# Tree of converted WebP files.
optimized = "assets_optimized"

# JSON rename mapping: { "old_base": "new_base", ... }.
mapping = "scripts/mapping.json"

# Where the metadata report is written.
metadata = "scripts/image_metadata.json"

# ---------------------------------------------------------------------------
# Image converter
# ---------------------------------------------------------------------------
[convert]
# WebP encoding quality (0 = worst, 100 = best).
quality = 80

# Output directory for converted files. Defaults to paths.optimized.
# output = "assets_optimized"
"##
}
