// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Picker feedback: markers and index labels drawn on a display-only copy of
// the source image.

use ab_glyph::{Font, FontRef, PxScale, ScaleFont};
use deskew_core::Point;
use deskew_core::error::{DeskewError, Result};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_text_mut};

/// Marker fill.
pub const MARKER_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
/// Index label colour.
pub const LABEL_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
/// Marker radius in pixels.
pub const MARKER_RADIUS: i32 = 10;
/// Label baseline offset from the marker centre.
pub const LABEL_OFFSET: (i32, i32) = (15, -15);
/// Label glyph height in pixels.
pub const LABEL_SCALE: f32 = 24.0;

/// Embedded so labels render the same on every machine.
static LABEL_FONT: &[u8] = include_bytes!("../../assets/DejaVuSansMono-Bold.ttf");

/// Owns the annotated copy shown to the operator. The source raster it was
/// built from is never touched.
pub struct Annotator {
    display: RgbImage,
    font: FontRef<'static>,
    revision: u64,
}

impl Annotator {
    pub fn new(source: &RgbImage) -> Result<Self> {
        let font = FontRef::try_from_slice(LABEL_FONT)
            .map_err(|err| DeskewError::LabelFont(err.to_string()))?;
        Ok(Self {
            display: source.clone(),
            font,
            revision: 0,
        })
    }

    /// The annotated image.
    pub fn image(&self) -> &RgbImage {
        &self.display
    }

    /// Bumped on every mark; lets a UI know when to re-upload its texture.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Draw a filled marker at `point` and its 1-based `index` beside it.
    pub fn mark(&mut self, index: usize, point: Point) {
        let cx = point.x.round() as i32;
        let cy = point.y.round() as i32;
        draw_filled_circle_mut(&mut self.display, (cx, cy), MARKER_RADIUS, MARKER_COLOR);

        // draw_text_mut positions the top of the line box, not the baseline.
        let scale = PxScale::from(LABEL_SCALE);
        let ascent = self.font.as_scaled(scale).ascent().round() as i32;
        draw_text_mut(
            &mut self.display,
            LABEL_COLOR,
            cx + LABEL_OFFSET.0,
            cy + LABEL_OFFSET.1 - ascent,
            scale,
            &self.font,
            &index.to_string(),
        );
        self.revision += 1;
    }
}
