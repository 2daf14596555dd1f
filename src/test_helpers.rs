//! Shared test utilities: fixture trees and synthetic images.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! write_jpeg(&tmp.path().join("assets/gallery/hero.jpg"), 1920, 1080);
//! touch(&tmp.path().join("assets_optimized/gallery/hero.webp"));
//! assert_eq!(relative_files(&tmp.path().join("assets")), vec!["gallery/hero.jpg"]);
//! ```

use image::{ImageEncoder, Rgb, RgbImage, Rgba, RgbaImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::scan::walk_files;

// =========================================================================
// Plain files
// =========================================================================

fn ensure_parent(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
}

/// Create an empty file, creating parent directories as needed.
pub fn touch(path: &Path) {
    write_bytes(path, b"");
}

/// Write arbitrary bytes, creating parent directories as needed.
pub fn write_bytes(path: &Path, bytes: &[u8]) {
    ensure_parent(path);
    std::fs::write(path, bytes).unwrap();
}

/// Every file under `root` as a `/`-joined relative path, in walk order.
pub fn relative_files(root: &Path) -> Vec<String> {
    walk_files(root)
        .map(|p| {
            p.strip_prefix(root)
                .unwrap()
                .components()
                .map(|c| c.as_os_str().to_string_lossy().to_string())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect()
}

// =========================================================================
// Synthetic images
// =========================================================================

/// Write a gradient JPEG with the given dimensions.
pub fn write_jpeg(path: &Path, width: u32, height: u32) {
    ensure_parent(path);
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let writer = BufWriter::new(File::create(path).unwrap());
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Write a PNG; with `alpha` the left half of the image is fully transparent.
pub fn write_png(path: &Path, width: u32, height: u32, alpha: bool) {
    ensure_parent(path);
    let writer = BufWriter::new(File::create(path).unwrap());
    let encoder = image::codecs::png::PngEncoder::new(writer);
    if alpha {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            let a = if x < width / 2 { 0 } else { 255 };
            Rgba([200, (y % 256) as u8, 40, a])
        });
        encoder
            .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgba8)
            .unwrap();
    } else {
        let img = RgbImage::from_fn(width, height, |x, _| Rgb([(x % 256) as u8, 90, 200]));
        encoder
            .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
            .unwrap();
    }
}

/// Write a two-colour palette PNG whose first palette entry is transparent
/// via a `tRNS` chunk. Alternating columns use each entry.
pub fn write_palette_png(path: &Path, width: u32, height: u32) {
    ensure_parent(path);
    let writer = BufWriter::new(File::create(path).unwrap());
    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(png::ColorType::Indexed);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_palette(vec![0u8, 0, 0, 255, 64, 0]);
    encoder.set_trns(vec![0u8, 255]);
    let mut png_writer = encoder.write_header().unwrap();
    let data: Vec<u8> = (0..height)
        .flat_map(|_| (0..width).map(|x| (x % 2) as u8))
        .collect();
    png_writer.write_image_data(&data).unwrap();
}
