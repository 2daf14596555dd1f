//! Mirror the converted tree's directory layout onto the originals tree.
//!
//! Converted files are the reference: wherever `x.webp` lives under the
//! converted root, every original `x.<jpg|jpeg|png>` is moved to the same
//! relative directory under the originals root. File names never change.
//!
//! ```text
//! assets_optimized/gallery/x.webp
//! assets/x.jpg                      → assets/gallery/x.jpg
//! assets/old/place/x.png            → assets/gallery/x.png
//! ```

use crate::fileops::FileOp;
use crate::naming;
use crate::scan::TreeIndex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Plan moves for every base name in `structure` (base → relative dir).
///
/// Originals already in place (same absolute path) produce no operation.
pub fn plan_moves(assets_root: &Path, structure: &BTreeMap<String, PathBuf>) -> Vec<FileOp> {
    let originals = TreeIndex::build(assets_root, naming::ORIGINAL_EXTENSIONS);

    let mut ops = Vec::new();
    for (base, rel_dir) in structure {
        let target_dir = if rel_dir.as_os_str().is_empty() {
            assets_root.to_path_buf()
        } else {
            assets_root.join(rel_dir)
        };
        for src in originals.all(base) {
            let Some(file_name) = src.file_name() else {
                continue;
            };
            let dst = target_dir.join(file_name);
            if same_location(src, &dst) {
                continue;
            }
            ops.extend(FileOp::new(src.clone(), dst));
        }
    }
    ops
}

fn same_location(a: &Path, b: &Path) -> bool {
    match (std::path::absolute(a), std::path::absolute(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
