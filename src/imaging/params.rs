//! Parameter types for image operations.
//!
//! These structs describe *what* to convert, not *how*. The converter builds
//! them from its plan and hands them to the backend, which keeps planning
//! testable with a mock backend.

use std::path::PathBuf;

/// Lossy encoding quality (0-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    pub const MAX: u8 = 100;

    pub fn new(value: u32) -> Self {
        Self(value.min(Self::MAX as u32) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(80)
    }
}

/// One source image to encode as WebP.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub quality: Quality,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0).value(), 0);
        assert_eq!(Quality::new(50).value(), 50);
        assert_eq!(Quality::new(100).value(), 100);
        assert_eq!(Quality::new(150).value(), 100);
    }

    #[test]
    fn quality_default_is_80() {
        assert_eq!(Quality::default().value(), 80);
    }
}
