//! Grid layout suggestions derived from image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.
//!
//! ## Rules
//!
//! ```text
//! width or height ≤ 0        → 1×1, normal
//! aspect = width / height
//! aspect > 1.1               → landscape: colSpan 2 if aspect ≥ 1.7, rowSpan 1
//! aspect < 0.9               → portrait:  rowSpan 2 if 1/aspect ≥ 1.6, colSpan 1
//! otherwise (0.9 ..= 1.1)    → square-ish: 1×1
//! priority = feature iff landscape and aspect ≥ 2.0
//! ```
//!
//! The thresholds are part of the output contract with the presentation layer
//! that consumes the metadata report, so they are constants rather than
//! configuration.

use serde::Serialize;

/// Aspect above which an image counts as landscape (exclusive).
pub const LANDSCAPE_MIN_ASPECT: f64 = 1.1;
/// Aspect below which an image counts as portrait (exclusive).
pub const PORTRAIT_MAX_ASPECT: f64 = 0.9;
/// Landscape aspect at which an image spans two columns (inclusive).
pub const WIDE_SPAN_MIN_ASPECT: f64 = 1.7;
/// Portrait height/width ratio at which an image spans two rows (inclusive).
pub const TALL_SPAN_MIN_RATIO: f64 = 1.6;
/// Landscape aspect at which an image is featured (inclusive).
pub const FEATURE_MIN_ASPECT: f64 = 2.0;
/// Decimal places kept in a reported aspect ratio.
pub const ASPECT_DECIMALS: usize = 4;

/// Exact orientation of an image, as reported in metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Square,
    Landscape,
    Portrait,
    /// Dimensions could not be read.
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Normal,
    Feature,
}

/// Grid placement hint for one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSuggestion {
    pub row_span: u32,
    pub col_span: u32,
    pub priority: Priority,
}

impl Default for LayoutSuggestion {
    fn default() -> Self {
        Self {
            row_span: 1,
            col_span: 1,
            priority: Priority::Normal,
        }
    }
}

/// Orientation band used for span decisions. Unlike [`Orientation`], this
/// has a tolerance band around 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bucket {
    Landscape,
    Portrait,
    SquareIsh,
}

fn bucket(aspect: f64) -> Bucket {
    if aspect > LANDSCAPE_MIN_ASPECT {
        Bucket::Landscape
    } else if aspect < PORTRAIT_MAX_ASPECT {
        Bucket::Portrait
    } else {
        Bucket::SquareIsh
    }
}

/// Suggest row span, column span and priority for an image.
///
/// # Examples
/// ```
/// # use asset_pipeline::layout::{suggest_layout, Priority};
/// let hd = suggest_layout(1920, 1080);
/// assert_eq!((hd.row_span, hd.col_span, hd.priority), (1, 2, Priority::Normal));
///
/// let banner = suggest_layout(3000, 1000);
/// assert_eq!(banner.priority, Priority::Feature);
/// ```
pub fn suggest_layout(width: u32, height: u32) -> LayoutSuggestion {
    if width == 0 || height == 0 {
        return LayoutSuggestion::default();
    }
    let aspect = width as f64 / height as f64;
    let band = bucket(aspect);

    let (row_span, col_span) = match band {
        Bucket::Landscape => (1, if aspect >= WIDE_SPAN_MIN_ASPECT { 2 } else { 1 }),
        Bucket::Portrait => (if 1.0 / aspect >= TALL_SPAN_MIN_RATIO { 2 } else { 1 }, 1),
        Bucket::SquareIsh => (1, 1),
    };

    let priority = if band == Bucket::Landscape && aspect >= FEATURE_MIN_ASPECT {
        Priority::Feature
    } else {
        Priority::Normal
    };

    LayoutSuggestion {
        row_span,
        col_span,
        priority,
    }
}

/// Width / height rounded to [`ASPECT_DECIMALS`] places; `None` when height is 0.
///
/// Rounding goes through the exact decimal expansion of the quotient, so
/// exact ties go to the even digit (`100 / 640 = 0.15625` → `0.1562`).
pub fn aspect_ratio(width: u32, height: u32) -> Option<f64> {
    if height == 0 {
        return None;
    }
    let quotient = width as f64 / height as f64;
    format!("{quotient:.ASPECT_DECIMALS$}").parse().ok()
}

/// Exact orientation from known dimensions.
pub fn classify_orientation(width: u32, height: u32) -> Orientation {
    use std::cmp::Ordering;
    match width.cmp(&height) {
        Ordering::Equal => Orientation::Square,
        Ordering::Greater => Orientation::Landscape,
        Ordering::Less => Orientation::Portrait,
    }
}
