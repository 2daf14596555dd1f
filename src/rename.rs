//! Mapping-driven renames across the originals and converted trees.
//!
//! For every `old → new` pair, each file named `old.<ext>` anywhere under
//! either tree is renamed in its own directory to `new.<ext>`. Only the base
//! name changes; the extension is kept exactly as written.
//!
//! ```text
//! mapping: { "IMG_2041": "engine_hood" }
//!
//! assets/landing/IMG_2041.JPG            → assets/landing/engine_hood.JPG
//! assets_optimized/landing/IMG_2041.webp → assets_optimized/landing/engine_hood.webp
//! ```

use crate::fileops::FileOp;
use crate::mapping::RenamePair;
use crate::naming;
use crate::scan::TreeIndex;
use std::path::Path;

/// Plan renames for every pair, originals first then converted files.
///
/// Pairs are handled in mapping order; within a tree, matches follow the
/// sorted traversal order.
pub fn plan_renames(pairs: &[RenamePair], assets_dir: &Path, optimized_dir: &Path) -> Vec<FileOp> {
    let originals = TreeIndex::build(assets_dir, naming::ORIGINAL_EXTENSIONS);
    let converted = TreeIndex::build(optimized_dir, naming::OPTIMIZED_EXTENSIONS);

    let mut ops = Vec::new();
    for pair in pairs {
        for index in [&originals, &converted] {
            ops.extend(
                index
                    .all(&pair.old)
                    .iter()
                    .filter_map(|src| FileOp::new(src.clone(), naming::with_base_name(src, &pair.new))),
            );
        }
    }
    ops
}
