// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rectifier configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DeskewError, Result};
use crate::types::{OutputGeometry, PaperSize};

/// Tallest rectified output accepted. Keeps the comparison canvas well inside
/// `u32` pixel arithmetic and a single in-memory buffer.
pub const MAX_OUTPUT_HEIGHT: u32 = 16_384;

/// Settings read once at startup and passed by value into the pipeline.
///
/// Any field missing from a JSON config file falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RectifierConfig {
    /// Source image to rectify.
    pub image_path: PathBuf,
    /// Destination for the side-by-side comparison image.
    pub output_path: PathBuf,
    /// Pixel height of the rectified output (default 1000).
    pub output_height: u32,
    /// Paper size whose proportions the output rectangle takes (default A4).
    pub paper_size: PaperSize,
}

impl Default for RectifierConfig {
    fn default() -> Self {
        Self {
            image_path: PathBuf::from("resources/test_document.jpg"),
            output_path: PathBuf::from("doc-homography.png"),
            output_height: 1000,
            paper_size: PaperSize::A4,
        }
    }
}

impl RectifierConfig {
    /// Load a config from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let config = serde_json::from_str(&data)?;
        Ok(config)
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.output_height == 0 {
            return Err(DeskewError::InvalidConfig(
                "output_height must be greater than zero".into(),
            ));
        }
        if self.output_height > MAX_OUTPUT_HEIGHT {
            return Err(DeskewError::InvalidConfig(format!(
                "output_height {} exceeds the maximum of {MAX_OUTPUT_HEIGHT}",
                self.output_height
            )));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(DeskewError::InvalidConfig(
                "output_path must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Size of the rectified output.
    pub fn output_geometry(&self) -> OutputGeometry {
        OutputGeometry::from_height(self.output_height, self.paper_size.aspect_ratio())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RectifierConfig::default();
        assert_eq!(config.output_path, PathBuf::from("doc-homography.png"));
        assert_eq!(config.output_height, 1000);
        assert_eq!(config.paper_size, PaperSize::A4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_height_is_rejected() {
        let config = RectifierConfig {
            output_height: 0,
            ..RectifierConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(DeskewError::InvalidConfig(_))
        ));
    }

    #[test]
    fn oversized_height_is_rejected() {
        let at_limit = RectifierConfig {
            output_height: MAX_OUTPUT_HEIGHT,
            ..RectifierConfig::default()
        };
        assert!(at_limit.validate().is_ok());

        let huge = RectifierConfig {
            output_height: u32::MAX,
            ..RectifierConfig::default()
        };
        assert!(matches!(
            huge.validate(),
            Err(DeskewError::InvalidConfig(msg)) if msg.contains("exceeds")
        ));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deskew.json");
        std::fs::write(&path, r#"{ "output_height": 500, "paper_size": "letter" }"#).unwrap();

        let config = RectifierConfig::from_json_file(&path).unwrap();
        assert_eq!(config.output_height, 500);
        assert_eq!(config.paper_size, PaperSize::Letter);
        assert_eq!(config.output_path, PathBuf::from("doc-homography.png"));
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deskew.json");
        std::fs::write(&path, "{ output_height: ").unwrap();

        assert!(matches!(
            RectifierConfig::from_json_file(&path),
            Err(DeskewError::Serialization(_))
        ));
    }

    #[test]
    fn geometry_uses_paper_size() {
        let config = RectifierConfig::default();
        let geometry = config.output_geometry();
        assert_eq!((geometry.width, geometry.height), (707, 1000));
    }
}
