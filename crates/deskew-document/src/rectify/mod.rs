// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rectification — solve the corner homography, warp the source raster into
// the output rectangle, and build the side-by-side comparison.

pub mod compose;
pub mod homography;

pub use compose::{SEPARATOR_COLOR, SEPARATOR_WIDTH, compose_comparison};
pub use homography::Homography;

use deskew_core::error::Result;
use deskew_core::{OutputGeometry, Point};
use image::{Rgb, RgbImage};
use imageproc::geometric_transformations::{Interpolation, warp_into};
use tracing::{debug, info, instrument, warn};

/// Value for output pixels whose preimage falls outside the source.
pub const FILL_PIXEL: Rgb<u8> = Rgb([0, 0, 0]);

/// Warps a picked document quadrilateral onto a `W × H` rectangle.
///
/// Corners are taken in pick order and mapped LT→(0,0), RT→(W,0), RB→(W,H),
/// LB→(0,H). Resampling is bilinear; anything mapping outside the source is
/// filled with black.
#[derive(Debug, Clone, Copy)]
pub struct Rectifier {
    geometry: OutputGeometry,
}

impl Rectifier {
    pub fn new(geometry: OutputGeometry) -> Self {
        Self { geometry }
    }

    /// Solve the transform for `corners`. Fails on coincident or collinear
    /// corners.
    pub fn homography(&self, corners: &[Point; 4]) -> Result<Homography> {
        Homography::from_correspondences(corners, &self.geometry.corners())
    }

    /// Resample `source` through the corner homography into a fresh
    /// `W × H` raster.
    ///
    /// A zero-width geometry has no rectangle to solve for, so the empty
    /// `0 × H` raster is returned without touching the corners.
    #[instrument(skip_all, fields(width = self.geometry.width, height = self.geometry.height))]
    pub fn rectify(&self, source: &RgbImage, corners: &[Point; 4]) -> Result<RgbImage> {
        let OutputGeometry { width, height } = self.geometry;
        if self.geometry.is_empty() {
            warn!(width, height, "Output geometry is empty; skipping warp");
            return Ok(RgbImage::new(width, height));
        }

        debug!(
            left_top = %corners[0],
            right_top = %corners[1],
            right_bottom = %corners[2],
            left_bottom = %corners[3],
            "Solving corner homography"
        );
        let homography = self.homography(corners)?;
        let projection = homography.to_projection()?;

        let mut output = RgbImage::new(width, height);
        warp_into(
            source,
            &projection,
            Interpolation::Bilinear,
            FILL_PIXEL,
            &mut output,
        );

        info!(width, height, "Perspective correction applied");
        Ok(output)
    }
}
