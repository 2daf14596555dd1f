//! Base-name and extension handling shared by every tool.
//!
//! The base name (a file name with its extension removed) is the join key
//! between an original image, its converted counterpart, and its entries in
//! the rename mapping and the metadata report:
//!
//! ```text
//! assets/gallery/engine_hood.JPG            base = "engine_hood", ext = "JPG"
//! assets_optimized/gallery/engine_hood.webp base = "engine_hood", ext = "webp"
//! ```
//!
//! Splitting follows the usual "last dot" rule: `photo.final.jpg` has base
//! `photo.final`, and a leading dot does not start an extension (`.hidden`
//! has no extension at all).

use std::path::{Path, PathBuf};

/// Extensions accepted in the originals tree (compared case-insensitively).
pub const ORIGINAL_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Extensions accepted in the converted tree (compared case-insensitively).
pub const OPTIMIZED_EXTENSIONS: &[&str] = &["webp"];

/// Extension written by the converter.
pub const OUTPUT_EXTENSION: &str = "webp";

/// Split a file name into `(base, extension)`.
///
/// - `"a.png"` → `("a", Some("png"))`
/// - `"photo.final.JPG"` → `("photo.final", Some("JPG"))`
/// - `"README"` → `("README", None)`
/// - `".hidden"` → `(".hidden", None)`
/// - `"trailing."` → `("trailing", Some(""))`
pub fn split_file_name(name: &str) -> (&str, Option<&str>) {
    let leading_dots = name.len() - name.trim_start_matches('.').len();
    match name[leading_dots..].rfind('.') {
        Some(pos) => {
            let dot = leading_dots + pos;
            (&name[..dot], Some(&name[dot + 1..]))
        }
        None => (name, None),
    }
}

/// Base name of a path, or `None` if the file name is not valid UTF-8.
pub fn base_name(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    Some(split_file_name(name).0)
}

/// Extension of a path exactly as written (case preserved).
pub fn extension(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    split_file_name(name).1
}

/// Whether the path's extension is one of `exts`, ignoring ASCII case.
pub fn has_extension(path: &Path, exts: &[&str]) -> bool {
    extension(path).is_some_and(|ext| exts.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

/// Same directory, same extension (exact case), new base name.
///
/// `dir/a.PNG` with `"b"` → `dir/b.PNG`.
pub fn with_base_name(path: &Path, new_base: &str) -> PathBuf {
    let file_name = match extension(path) {
        Some(ext) => format!("{new_base}.{ext}"),
        None => new_base.to_string(),
    };
    path.with_file_name(file_name)
}
