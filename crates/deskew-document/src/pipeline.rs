// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// One rectification run: load → pick corners → warp → compose → write → show.
// The interactive surfaces sit behind `CornerPicker` and `ComparisonViewer`.

use std::path::PathBuf;

use deskew_core::RectifierConfig;
use deskew_core::error::Result;
use image::RgbImage;
use tracing::{info, instrument, warn};

use crate::raster::ImageProcessor;
use crate::rectify::{Rectifier, compose_comparison};
use crate::select::{CORNER_COUNT, CornerSelection};

/// Collects the document corners from the operator.
pub trait CornerPicker {
    /// Show `image` and block until four corners are picked or the operator
    /// cancels.
    fn pick(&mut self, image: &RgbImage) -> Result<CornerSelection>;
}

/// Presents the finished comparison.
pub trait ComparisonViewer {
    /// Show `comparison` and block until the operator dismisses it.
    fn show(&mut self, comparison: &RgbImage) -> Result<()>;
}

/// How a run ended, when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The comparison image was written and shown.
    Written {
        path: PathBuf,
        width: u32,
        height: u32,
    },
    /// The operator cancelled with fewer than four corners; nothing was
    /// processed.
    Cancelled { selected: usize },
}

/// Drives a single run from a fixed configuration.
pub struct Pipeline {
    config: RectifierConfig,
}

impl Pipeline {
    pub fn new(config: RectifierConfig) -> Self {
        Self { config }
    }

    /// Run once.
    ///
    /// The config is validated and the source image loaded before the picker
    /// is shown, so bad settings or a missing or unreadable file fail without
    /// any window opening. An incomplete selection ends the run without
    /// touching the homography, warp, or output stages.
    #[instrument(skip_all, fields(image = %self.config.image_path.display()))]
    pub fn run(
        &self,
        picker: &mut impl CornerPicker,
        viewer: &mut impl ComparisonViewer,
    ) -> Result<Outcome> {
        self.config.validate()?;
        let source = ImageProcessor::open(&self.config.image_path)?.into_rgb8();

        info!("Select {CORNER_COUNT} corners: LT, RT, RB, LB (press Esc to cancel)");
        let selection = picker.pick(&source)?;
        let corners = match selection.corners() {
            Ok(corners) => corners,
            Err(_) => {
                warn!(
                    selected = selection.len(),
                    "Exactly {CORNER_COUNT} corners required; nothing to rectify"
                );
                return Ok(Outcome::Cancelled {
                    selected: selection.len(),
                });
            }
        };

        let geometry = self.config.output_geometry();
        let rectified = Rectifier::new(geometry).rectify(&source, &corners)?;
        let comparison = compose_comparison(&source, &rectified, geometry);

        let output = ImageProcessor::from_rgb8(comparison);
        output.save(&self.config.output_path)?;
        let (width, height) = (output.width(), output.height());
        info!(
            path = %self.config.output_path.display(),
            width,
            height,
            "Comparison written"
        );

        viewer.show(&output.into_rgb8())?;

        Ok(Outcome::Written {
            path: self.config.output_path.clone(),
            width,
            height,
        })
    }
}
