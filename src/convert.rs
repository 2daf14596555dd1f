//! Batch conversion of raster originals to WebP.
//!
//! ## Output Structure
//!
//! The relative directory of every source is reproduced under the output
//! directory, and the file keeps its base name with a `.webp` extension:
//!
//! ```text
//! assets/                          assets_optimized/
//! ├── hero.PNG               →     ├── hero.webp
//! └── gallery/                     └── gallery/
//!     ├── car.jpg            →         ├── car.webp
//!     └── notes.txt                    (not an image, ignored)
//! ```
//!
//! A single file may be given instead of a directory; it is written directly
//! into the output directory. A single file with an unsupported extension is
//! reported as skipped rather than failing the run.
//!
//! ## Failures
//!
//! Each file is converted independently. A file that cannot be decoded or
//! encoded produces a failed [`ConvertOutcome`] and the batch moves on.

use crate::imaging::{ConversionReport, ConvertParams, ImageBackend, Quality};
use crate::naming;
use crate::scan::walk_files;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Input path does not exist: {}", .0.display())]
    InputNotFound(PathBuf),
}

/// One source image and where its WebP goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertJob {
    pub source: PathBuf,
    pub output: PathBuf,
}

/// Everything a conversion run will touch, decided before any pixels move.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionPlan {
    pub jobs: Vec<ConvertJob>,
    /// Explicitly named inputs that are not convertible.
    pub skipped: Vec<PathBuf>,
}

#[derive(Debug)]
pub struct ConvertOutcome {
    pub job: ConvertJob,
    pub result: Result<ConversionReport, String>,
}

/// Output path for a source found at `relative_dir` below the input root.
fn output_path(output_dir: &Path, relative_dir: &Path, source: &Path) -> Option<PathBuf> {
    let base = naming::base_name(source)?;
    Some(
        output_dir
            .join(relative_dir)
            .join(format!("{base}.{}", naming::OUTPUT_EXTENSION)),
    )
}

/// Decide which files to convert and where each one lands.
pub fn plan_conversions(input: &Path, output_dir: &Path) -> Result<ConversionPlan, ConvertError> {
    let mut plan = ConversionPlan::default();

    if input.is_file() {
        match output_path(output_dir, Path::new(""), input)
            .filter(|_| naming::has_extension(input, naming::ORIGINAL_EXTENSIONS))
        {
            Some(output) => plan.jobs.push(ConvertJob {
                source: input.to_path_buf(),
                output,
            }),
            None => plan.skipped.push(input.to_path_buf()),
        }
        return Ok(plan);
    }

    if !input.is_dir() {
        return Err(ConvertError::InputNotFound(input.to_path_buf()));
    }

    for source in walk_files(input) {
        if !naming::has_extension(&source, naming::ORIGINAL_EXTENSIONS) {
            tracing::debug!(path = %source.display(), "not a convertible image");
            continue;
        }
        let relative_dir = source
            .parent()
            .and_then(|p| p.strip_prefix(input).ok())
            .unwrap_or(Path::new(""));
        if let Some(output) = output_path(output_dir, relative_dir, &source) {
            plan.jobs.push(ConvertJob { source, output });
        }
    }
    Ok(plan)
}

/// Convert every planned job, continuing past failures.
///
/// `on_outcome` is called after each file so callers can report progress.
pub fn convert_all(
    backend: &impl ImageBackend,
    plan: &ConversionPlan,
    quality: Quality,
    mut on_outcome: impl FnMut(&ConvertOutcome),
) -> Vec<ConvertOutcome> {
    let mut outcomes = Vec::with_capacity(plan.jobs.len());
    for job in &plan.jobs {
        let result = convert_one(backend, job, quality);
        if let Err(reason) = &result {
            tracing::debug!(source = %job.source.display(), reason = %reason, "conversion failed");
        }
        let outcome = ConvertOutcome {
            job: job.clone(),
            result,
        };
        on_outcome(&outcome);
        outcomes.push(outcome);
    }
    outcomes
}

fn convert_one(
    backend: &impl ImageBackend,
    job: &ConvertJob,
    quality: Quality,
) -> Result<ConversionReport, String> {
    if let Some(parent) = job.output.parent() {
        std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }
    backend
        .convert(&ConvertParams {
            source: job.source.clone(),
            output: job.output.clone(),
            quality,
        })
        .map_err(|e| e.to_string())
}
