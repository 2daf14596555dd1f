//! End-to-end run of all four tools over a temporary asset tree.
//!
//! Uses the real `RustBackend`, so images are actually decoded and encoded.
//! Fixtures are small synthetic images written with the `image` encoders.

use asset_pipeline::fileops::{self, ApplyOptions, OpOutcome};
use asset_pipeline::imaging::{Quality, RustBackend};
use asset_pipeline::mapping::MappingDocument;
use asset_pipeline::{convert, metadata, mirror, rename, scan};
use image::{ImageEncoder, Rgb, RgbImage, Rgba, RgbaImage};
use serde_json::{Value, json};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tempfile::TempDir;

fn write_jpeg(path: &Path, width: u32, height: u32) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 60])
    });
    image::codecs::jpeg::JpegEncoder::new(BufWriter::new(File::create(path).unwrap()))
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

fn write_transparent_png(path: &Path, width: u32, height: u32) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let img = RgbaImage::from_fn(width, height, |x, _| {
        Rgba([30, 90, 200, if x < width / 2 { 0 } else { 255 }])
    });
    image::codecs::png::PngEncoder::new(BufWriter::new(File::create(path).unwrap()))
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgba8)
        .unwrap();
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn full_pipeline() {
    let tmp = TempDir::new().unwrap();
    let assets = tmp.path().join("assets");
    let optimized = tmp.path().join("assets_optimized");
    let mapping = tmp.path().join("scripts/mapping.json");
    let report_path = tmp.path().join("scripts/out/image_metadata.json");

    write_jpeg(&assets.join("landing/IMG_2041.JPG"), 192, 108);
    write_jpeg(&assets.join("gallery/IMG_2042.jpeg"), 60, 100);
    write_transparent_png(&assets.join("logo.png"), 40, 40);
    std::fs::write(assets.join("gallery/notes.txt"), "not an image").unwrap();

    // convert
    let plan = convert::plan_conversions(&assets, &optimized).unwrap();
    assert_eq!(plan.jobs.len(), 3);
    let outcomes = convert::convert_all(&RustBackend::new(), &plan, Quality::default(), |_| {});
    assert!(outcomes.iter().all(|o| o.result.is_ok()));
    assert!(optimized.join("landing/IMG_2041.webp").is_file());
    assert!(optimized.join("gallery/IMG_2042.webp").is_file());
    assert!(!optimized.join("gallery/notes.webp").exists());

    let logo = image::open(optimized.join("logo.webp")).unwrap();
    assert!(logo.color().has_alpha());
    let hood = image::open(optimized.join("landing/IMG_2041.webp")).unwrap();
    assert!(!hood.color().has_alpha());
    assert_eq!((hood.width(), hood.height()), (192, 108));

    // rename
    std::fs::create_dir_all(mapping.parent().unwrap()).unwrap();
    std::fs::write(
        &mapping,
        r#"{"IMG_2041": "engine_hood", "IMG_2042": "door", "metadata": {"stale": true}}"#,
    )
    .unwrap();
    let pairs = MappingDocument::load(&mapping).unwrap().rename_pairs();
    let ops = rename::plan_renames(&pairs, &assets, &optimized);
    assert_eq!(ops.len(), 4);
    let results = fileops::apply(&ops, ApplyOptions::default());
    assert!(results.iter().all(|(_, o)| *o == OpOutcome::Applied));
    assert!(assets.join("landing/engine_hood.JPG").is_file());
    assert!(optimized.join("gallery/door.webp").is_file());

    // reorganize the converted tree, then mirror it onto the originals
    std::fs::create_dir_all(optimized.join("hero")).unwrap();
    std::fs::rename(
        optimized.join("landing/engine_hood.webp"),
        optimized.join("hero/engine_hood.webp"),
    )
    .unwrap();
    let moves = mirror::plan_moves(&assets, &scan::scan_structure(&optimized));
    assert_eq!(moves.len(), 1);
    fileops::apply(&moves, ApplyOptions::default());
    assert!(assets.join("hero/engine_hood.JPG").is_file());
    assert!(!assets.join("landing/engine_hood.JPG").exists());

    // metadata
    let report = metadata::build_metadata(&RustBackend::new(), &pairs, &assets, &optimized);
    assert_eq!(
        report.keys().collect::<Vec<_>>(),
        vec!["door", "engine_hood", "logo"]
    );
    metadata::write_metadata(&report_path, &report).unwrap();
    metadata::merge_into_mapping(&mapping, &report).unwrap();

    let written = read_json(&report_path);
    let hood = &written["engine_hood"];
    assert_eq!(hood["width"], json!(192));
    assert_eq!(hood["height"], json!(108));
    assert_eq!(hood["aspectRatio"], json!(1.7778));
    assert_eq!(hood["orientation"], json!("landscape"));
    assert_eq!(
        hood["layout"],
        json!({"rowSpan": 1, "colSpan": 2, "priority": "normal"})
    );
    assert_eq!(hood["paths"]["sourceUsedForDimensions"], json!("optimized"));
    assert!(hood["bytes"].as_u64().unwrap() > 0);

    let door = &written["door"];
    assert_eq!(door["orientation"], json!("portrait"));
    assert_eq!(door["layout"]["rowSpan"], json!(2));
    assert_eq!(written["logo"]["orientation"], json!("square"));

    let doc = read_json(&mapping);
    assert_eq!(doc["IMG_2041"], json!("engine_hood"));
    assert_eq!(doc["IMG_2042"], json!("door"));
    assert_eq!(doc["metadata"], written);
}

#[test]
fn dry_run_leaves_tree_untouched() {
    let tmp = TempDir::new().unwrap();
    let assets = tmp.path().join("assets");
    let optimized = tmp.path().join("assets_optimized");
    write_jpeg(&assets.join("IMG_1.jpg"), 8, 8);
    std::fs::create_dir_all(optimized.join("gallery")).unwrap();
    std::fs::write(optimized.join("gallery/IMG_1.webp"), b"").unwrap();

    let moves = mirror::plan_moves(&assets, &scan::scan_structure(&optimized));
    let results = fileops::apply(
        &moves,
        ApplyOptions {
            dry_run: true,
            force: false,
        },
    );
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].1, OpOutcome::DryRun);
    assert!(assets.join("IMG_1.jpg").is_file());
    assert!(!assets.join("gallery").exists());
}

#[test]
fn missing_mapping_is_fatal() {
    let tmp = TempDir::new().unwrap();
    assert!(MappingDocument::load(&tmp.path().join("nope.json")).is_err());
}
