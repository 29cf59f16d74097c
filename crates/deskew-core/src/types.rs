// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for document rectification.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::DeskewError;

/// A pixel coordinate in source-image space.
///
/// Picked points are whole pixels, but the homography works in `f64`, so the
/// coordinate type is floating point throughout.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Document corners, in the order the operator is asked to pick them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    LeftTop,
    RightTop,
    RightBottom,
    LeftBottom,
}

impl Corner {
    /// Pick order: click `n` (0-based) lands on `Corner::ALL[n]`.
    pub const ALL: [Corner; 4] = [
        Corner::LeftTop,
        Corner::RightTop,
        Corner::RightBottom,
        Corner::LeftBottom,
    ];

    /// Short label used in log messages and the picker window title.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Self::LeftTop => "LT",
            Self::RightTop => "RT",
            Self::RightBottom => "RB",
            Self::LeftBottom => "LB",
        }
    }
}

/// Standard paper sizes. The output rectangle takes its proportions from one
/// of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    A3,
    #[default]
    A4,
    A5,
    Letter,
    Legal,
}

impl PaperSize {
    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::A3 => (297, 420),
            Self::A4 => (210, 297),
            Self::A5 => (148, 210),
            Self::Letter => (216, 279),
            Self::Legal => (216, 356),
        }
    }

    /// Height over width. 297/210 for A4.
    pub fn aspect_ratio(&self) -> f64 {
        let (width_mm, height_mm) = self.dimensions_mm();
        f64::from(height_mm) / f64::from(width_mm)
    }
}

impl FromStr for PaperSize {
    type Err = DeskewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a3" => Ok(Self::A3),
            "a4" => Ok(Self::A4),
            "a5" => Ok(Self::A5),
            "letter" => Ok(Self::Letter),
            "legal" => Ok(Self::Legal),
            _ => Err(DeskewError::UnknownPaperSize(s.to_string())),
        }
    }
}

/// Pixel size of the rectified output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputGeometry {
    pub width: u32,
    pub height: u32,
}

impl OutputGeometry {
    /// Derive the output size from a target height and a height/width aspect
    /// ratio. The width is floored, so very small heights can yield width 0.
    pub fn from_height(height: u32, aspect_ratio: f64) -> Self {
        let width = (f64::from(height) / aspect_ratio).floor() as u32;
        Self { width, height }
    }

    /// True when the output has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Destination point for a picked corner.
    pub fn corner(&self, corner: Corner) -> Point {
        let w = f64::from(self.width);
        let h = f64::from(self.height);
        match corner {
            Corner::LeftTop => Point::new(0.0, 0.0),
            Corner::RightTop => Point::new(w, 0.0),
            Corner::RightBottom => Point::new(w, h),
            Corner::LeftBottom => Point::new(0.0, h),
        }
    }

    /// All four destination corners in pick order.
    pub fn corners(&self) -> [Point; 4] {
        Corner::ALL.map(|corner| self.corner(corner))
    }
}
