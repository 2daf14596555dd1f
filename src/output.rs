//! CLI output formatting for every tool.
//!
//! # Output Format
//!
//! ## Rename / Mirror
//!
//! The plan is listed first, then one line per outcome:
//!
//! ```text
//! Planned operations: 2
//!  - assets/IMG_1.jpg → assets/hood.jpg
//!  - assets/IMG_2.jpg → assets/door.jpg
//! ✅ assets/IMG_1.jpg → assets/hood.jpg
//! ⏭️  Skipping (exists): assets/door.jpg — use --force to overwrite
//! ```
//!
//! ## Convert
//!
//! ```text
//! ✅ assets/hero.png → assets_optimized/hero.webp
//! ⚠️ Error converting assets/broken.jpg: Failed to decode ...
//! ```
//!
//! ## Metadata
//!
//! ```text
//! ✅ Wrote metadata for 12 images to scripts/image_metadata.json
//! ✅ Merged metadata into scripts/mapping.json under key 'metadata'
//! ```
//!
//! # Architecture
//!
//! Each report has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::convert::ConvertOutcome;
use crate::fileops::{FileOp, OpOutcome};
use crate::mapping::METADATA_KEY;
use std::path::Path;

/// Which tool a batch of file operations belongs to. Only the wording differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Rename,
    Move,
}

impl OpKind {
    fn planned_header(self) -> &'static str {
        match self {
            OpKind::Rename => "Planned operations",
            OpKind::Move => "Planned moves",
        }
    }

    fn verb(self) -> &'static str {
        match self {
            OpKind::Rename => "rename",
            OpKind::Move => "move",
        }
    }

    fn nothing_planned(self) -> &'static str {
        match self {
            OpKind::Rename => "No rename operations found. Check your mapping and directories.",
            OpKind::Move => "No matching originals to move.",
        }
    }
}

fn arrow(op: &FileOp) -> String {
    format!(
        "{} \u{2192} {}",
        op.source().display(),
        op.destination().display()
    )
}

// ============================================================================
// Rename / Mirror
// ============================================================================

/// Format the plan listing, or the "nothing to do" notice for an empty plan.
pub fn format_plan(kind: OpKind, ops: &[FileOp]) -> Vec<String> {
    if ops.is_empty() {
        return vec![kind.nothing_planned().to_string()];
    }
    let mut lines = Vec::with_capacity(ops.len() + 1);
    lines.push(format!("{}: {}", kind.planned_header(), ops.len()));
    lines.extend(ops.iter().map(|op| format!(" - {}", arrow(op))));
    lines
}

/// Format one line for an applied (or skipped, or failed) operation.
pub fn format_op_outcome(kind: OpKind, op: &FileOp, outcome: &OpOutcome) -> String {
    match outcome {
        OpOutcome::Applied => format!("\u{2705} {}", arrow(op)),
        OpOutcome::DryRun => format!(
            "DRY-RUN: {} -> {}",
            op.source().display(),
            op.destination().display()
        ),
        OpOutcome::SkippedExists => format!(
            "\u{23ed}\u{fe0f}  Skipping (exists): {} \u{2014} use --force to overwrite",
            op.destination().display()
        ),
        OpOutcome::Failed(reason) => format!(
            "\u{26a0}\u{fe0f}  Failed to {} {}: {}",
            kind.verb(),
            arrow(op),
            reason
        ),
    }
}

pub fn format_apply_results(kind: OpKind, results: &[(FileOp, OpOutcome)]) -> Vec<String> {
    results
        .iter()
        .map(|(op, outcome)| format_op_outcome(kind, op, outcome))
        .collect()
}

pub fn print_plan(kind: OpKind, ops: &[FileOp]) {
    for line in format_plan(kind, ops) {
        println!("{}", line);
    }
}

pub fn print_apply_results(kind: OpKind, results: &[(FileOp, OpOutcome)]) {
    for line in format_apply_results(kind, results) {
        println!("{}", line);
    }
}

// ============================================================================
// Convert
// ============================================================================

pub fn format_convert_outcome(outcome: &ConvertOutcome) -> String {
    match &outcome.result {
        Ok(_) => format!(
            "\u{2705} {} \u{2192} {}",
            outcome.job.source.display(),
            outcome.job.output.display()
        ),
        Err(reason) => format!(
            "\u{26a0}\u{fe0f} Error converting {}: {}",
            outcome.job.source.display(),
            reason
        ),
    }
}

pub fn format_skipped_input(path: &Path) -> String {
    format!("Skipping unsupported file: {}", path.display())
}

/// Closing line for a conversion run.
pub fn format_convert_summary(outcomes: &[ConvertOutcome]) -> String {
    if outcomes.is_empty() {
        return "No convertible images found.".to_string();
    }
    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    let converted = outcomes.len() - failed;
    match failed {
        0 => format!("Converted {} images", converted),
        _ => format!("Converted {} images, {} failed", converted, failed),
    }
}

pub fn print_convert_outcome(outcome: &ConvertOutcome) {
    println!("{}", format_convert_outcome(outcome));
}

// ============================================================================
// Metadata
// ============================================================================

pub fn format_metadata_written(count: usize, path: &Path) -> String {
    format!(
        "\u{2705} Wrote metadata for {} images to {}",
        count,
        path.display()
    )
}

pub fn format_metadata_merged(mapping: &Path) -> String {
    format!(
        "\u{2705} Merged metadata into {} under key '{}'",
        mapping.display(),
        METADATA_KEY
    )
}
