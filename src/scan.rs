//! Tree walking and base-name lookup.
//!
//! Every tool joins the originals tree and the converted tree on base name.
//! This module walks a tree once and indexes its files so the tools can ask
//! "which files under this root are called `engine_hood`?" without re-walking.
//!
//! ## Traversal order
//!
//! Trees are walked depth-first with siblings sorted by file name, so the
//! same tree always yields the same order on every platform. When a base name
//! occurs more than once (e.g. `gallery/hero.jpg` and `landing/hero.png`),
//! "first match" means first in that sorted traversal:
//!
//! ```text
//! assets/
//! ├── gallery/
//! │   └── hero.jpg      ← first("hero")
//! └── landing/
//!     └── hero.png      ← also in all("hero")
//! ```
//!
//! Duplicates are kept in the index and reported through [`TreeIndex::duplicates`]
//! so callers that only use the first match can warn about the ambiguity.

use crate::naming;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Walk every regular file under `root` in sorted depth-first order.
///
/// A missing root yields nothing. Entries that cannot be read are skipped.
/// Symlinks to files are yielded; symlinked directories are not descended.
pub fn walk_files(root: &Path) -> impl Iterator<Item = PathBuf> + use<> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::debug!(error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.path().is_file())
        .map(|entry| entry.into_path())
}

/// Files under one root, grouped by base name, restricted to a set of extensions.
#[derive(Debug, Clone, Default)]
pub struct TreeIndex {
    root: PathBuf,
    by_base: BTreeMap<String, Vec<PathBuf>>,
}

impl TreeIndex {
    /// Walk `root` and index every file whose extension is in `exts`.
    pub fn build(root: &Path, exts: &[&str]) -> Self {
        let mut by_base: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
        for path in walk_files(root) {
            if !naming::has_extension(&path, exts) {
                continue;
            }
            let Some(base) = naming::base_name(&path) else {
                tracing::debug!(path = %path.display(), "skipping non UTF-8 file name");
                continue;
            };
            by_base.entry(base.to_string()).or_default().push(path);
        }
        tracing::debug!(root = %root.display(), names = by_base.len(), "indexed tree");
        Self {
            root: root.to_path_buf(),
            by_base,
        }
    }

    /// First file (in traversal order) with this base name.
    pub fn first(&self, base: &str) -> Option<&Path> {
        self.by_base
            .get(base)
            .and_then(|paths| paths.first())
            .map(PathBuf::as_path)
    }

    /// Every file with this base name, in traversal order.
    pub fn all(&self, base: &str) -> &[PathBuf] {
        self.by_base.get(base).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All indexed base names, sorted.
    pub fn base_names(&self) -> impl Iterator<Item = &str> {
        self.by_base.keys().map(String::as_str)
    }

    /// Base names matched by more than one file.
    pub fn duplicates(&self) -> impl Iterator<Item = (&str, &[PathBuf])> {
        self.by_base
            .iter()
            .filter(|(_, paths)| paths.len() > 1)
            .map(|(base, paths)| (base.as_str(), paths.as_slice()))
    }

    /// Log a warning for every ambiguous base name.
    pub fn warn_duplicates(&self) {
        for (base, paths) in self.duplicates() {
            tracing::warn!(
                root = %self.root.display(),
                base,
                count = paths.len(),
                first = %paths[0].display(),
                "base name matches several files; using the first in sorted order"
            );
        }
    }

    pub fn len(&self) -> usize {
        self.by_base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_base.is_empty()
    }
}

/// Map each converted file's base name to the directory it lives in,
/// relative to `optimized_root`. Files at the root map to an empty path.
///
/// When a base name appears in several directories, the first in traversal
/// order wins.
pub fn scan_structure(optimized_root: &Path) -> BTreeMap<String, PathBuf> {
    let index = TreeIndex::build(optimized_root, naming::OPTIMIZED_EXTENSIONS);
    index.warn_duplicates();

    index
        .by_base
        .iter()
        .filter_map(|(base, paths)| {
            let parent = paths.first()?.parent()?;
            let relative = parent.strip_prefix(optimized_root).ok()?;
            Some((base.clone(), relative.to_path_buf()))
        })
        .collect()
}
