//! Plan-then-apply filesystem moves.
//!
//! The renamer and the structure mirror both work in two phases:
//!
//! ```text
//! 1. Plan   trees + mapping  →  Vec<FileOp>        (pure data, printable)
//! 2. Apply  Vec<FileOp>      →  Vec<(FileOp, OpOutcome)>
//! ```
//!
//! Applying is best-effort: every operation gets its own outcome and a
//! failure never stops the batch. A dry run performs no filesystem writes at
//! all, not even directory creation.

use std::path::{Path, PathBuf};

/// A single planned move. Source and destination always differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOp {
    source: PathBuf,
    destination: PathBuf,
}

impl FileOp {
    /// `None` when source and destination are the same path.
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Option<Self> {
        let (source, destination) = (source.into(), destination.into());
        (source != destination).then_some(Self {
            source,
            destination,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Report what would happen without touching the filesystem.
    pub dry_run: bool,
    /// Overwrite destinations that already exist.
    pub force: bool,
}

/// What happened to one planned operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpOutcome {
    Applied,
    DryRun,
    /// Destination exists and `force` was not set.
    SkippedExists,
    Failed(String),
}

impl OpOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, OpOutcome::Failed(_))
    }
}

/// Apply operations in order, one outcome per operation.
pub fn apply(ops: &[FileOp], options: ApplyOptions) -> Vec<(FileOp, OpOutcome)> {
    ops.iter()
        .map(|op| (op.clone(), apply_one(op, options)))
        .collect()
}

fn apply_one(op: &FileOp, options: ApplyOptions) -> OpOutcome {
    if op.destination.exists() && !options.force {
        return OpOutcome::SkippedExists;
    }
    if options.dry_run {
        return OpOutcome::DryRun;
    }
    match move_file(&op.source, &op.destination) {
        Ok(()) => {
            tracing::debug!(
                source = %op.source.display(),
                destination = %op.destination.display(),
                "moved"
            );
            OpOutcome::Applied
        }
        Err(err) => OpOutcome::Failed(err.to_string()),
    }
}

fn move_file(source: &Path, destination: &Path) -> std::io::Result<()> {
    if let Some(parent) = destination.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::rename(source, destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{relative_files, write_bytes};
    use tempfile::TempDir;

    #[test]
    fn identical_paths_produce_no_op() {
        assert!(FileOp::new("a/b.png", "a/b.png").is_none());
        assert!(FileOp::new("a/b.png", "a/c.png").is_some());
    }

    #[test]
    fn apply_moves_file_and_creates_parent() {
        let tmp = TempDir::new().unwrap();
        write_bytes(&tmp.path().join("x.jpg"), b"x");
        let op = FileOp::new(tmp.path().join("x.jpg"), tmp.path().join("gallery/x.jpg")).unwrap();

        let results = apply(&[op], ApplyOptions::default());
        assert_eq!(results[0].1, OpOutcome::Applied);
        assert_eq!(relative_files(tmp.path()), vec!["gallery/x.jpg"]);
    }

    #[test]
    fn dry_run_touches_nothing() {
        let tmp = TempDir::new().unwrap();
        write_bytes(&tmp.path().join("x.jpg"), b"x");
        let op = FileOp::new(tmp.path().join("x.jpg"), tmp.path().join("gallery/x.jpg")).unwrap();

        let results = apply(
            &[op],
            ApplyOptions {
                dry_run: true,
                force: false,
            },
        );
        assert_eq!(results[0].1, OpOutcome::DryRun);
        assert_eq!(relative_files(tmp.path()), vec!["x.jpg"]);
        assert!(!tmp.path().join("gallery").exists());
    }

    #[test]
    fn existing_destination_is_skipped_without_force() {
        let tmp = TempDir::new().unwrap();
        write_bytes(&tmp.path().join("a.png"), b"old");
        write_bytes(&tmp.path().join("b.png"), b"existing");
        let op = FileOp::new(tmp.path().join("a.png"), tmp.path().join("b.png")).unwrap();

        let results = apply(&[op], ApplyOptions::default());
        assert_eq!(results[0].1, OpOutcome::SkippedExists);
        assert_eq!(std::fs::read(tmp.path().join("a.png")).unwrap(), b"old");
        assert_eq!(std::fs::read(tmp.path().join("b.png")).unwrap(), b"existing");
    }

    #[test]
    fn existing_destination_is_skipped_in_dry_run_too() {
        let tmp = TempDir::new().unwrap();
        write_bytes(&tmp.path().join("a.png"), b"old");
        write_bytes(&tmp.path().join("b.png"), b"existing");
        let op = FileOp::new(tmp.path().join("a.png"), tmp.path().join("b.png")).unwrap();

        let results = apply(
            &[op],
            ApplyOptions {
                dry_run: true,
                force: false,
            },
        );
        assert_eq!(results[0].1, OpOutcome::SkippedExists);
    }

    #[test]
    fn force_overwrites_destination() {
        let tmp = TempDir::new().unwrap();
        write_bytes(&tmp.path().join("a.png"), b"old");
        write_bytes(&tmp.path().join("b.png"), b"existing");
        let op = FileOp::new(tmp.path().join("a.png"), tmp.path().join("b.png")).unwrap();

        let results = apply(
            &[op],
            ApplyOptions {
                dry_run: false,
                force: true,
            },
        );
        assert_eq!(results[0].1, OpOutcome::Applied);
        assert!(!tmp.path().join("a.png").exists());
        assert_eq!(std::fs::read(tmp.path().join("b.png")).unwrap(), b"old");
    }

    #[test]
    fn failure_does_not_stop_the_batch() {
        let tmp = TempDir::new().unwrap();
        write_bytes(&tmp.path().join("ok.png"), b"ok");
        let missing = FileOp::new(tmp.path().join("gone.png"), tmp.path().join("new.png")).unwrap();
        let fine = FileOp::new(tmp.path().join("ok.png"), tmp.path().join("renamed.png")).unwrap();

        let results = apply(&[missing, fine], ApplyOptions::default());
        assert!(results[0].1.is_failure());
        assert_eq!(results[1].1, OpOutcome::Applied);
        assert!(tmp.path().join("renamed.png").exists());
    }
}
