// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Side-by-side comparison: resized original | white strip | rectified page.

use deskew_core::OutputGeometry;
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use tracing::{debug, instrument};

/// Width of the strip between the two halves.
pub const SEPARATOR_WIDTH: u32 = 32;
/// Colour of the strip.
pub const SEPARATOR_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

/// Build the `(2W + 32) × H` comparison image.
///
/// The original is stretched to `W × H` with a triangle (bilinear) filter so
/// both halves line up; this is for viewing only and carries no geometric
/// meaning. `rectified` is expected to be `W × H` already. The result depends
/// only on the inputs.
#[instrument(skip(source, rectified), fields(width = geometry.width, height = geometry.height))]
pub fn compose_comparison(
    source: &RgbImage,
    rectified: &RgbImage,
    geometry: OutputGeometry,
) -> RgbImage {
    let OutputGeometry { width, height } = geometry;

    let mut canvas = RgbImage::from_pixel(2 * width + SEPARATOR_WIDTH, height, SEPARATOR_COLOR);
    if !geometry.is_empty() {
        let resized = imageops::resize(source, width, height, FilterType::Triangle);
        imageops::replace(&mut canvas, &resized, 0, 0);
        imageops::replace(&mut canvas, rectified, i64::from(width + SEPARATOR_WIDTH), 0);
    }

    debug!(
        out_w = canvas.width(),
        out_h = canvas.height(),
        "Comparison composed"
    );
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_original_separator_rectified() {
        let source = RgbImage::from_pixel(40, 60, Rgb([10, 20, 30]));
        let rectified = RgbImage::from_pixel(7, 10, Rgb([200, 0, 0]));
        let geometry = OutputGeometry {
            width: 7,
            height: 10,
        };

        let out = compose_comparison(&source, &rectified, geometry);
        assert_eq!(out.dimensions(), (2 * 7 + 32, 10));
        assert_eq!(*out.get_pixel(3, 5), Rgb([10, 20, 30]));
        for x in 7..(7 + SEPARATOR_WIDTH) {
            assert_eq!(*out.get_pixel(x, 9), SEPARATOR_COLOR);
        }
        assert_eq!(*out.get_pixel(7 + 32, 0), Rgb([200, 0, 0]));
        assert_eq!(*out.get_pixel(2 * 7 + 31, 9), Rgb([200, 0, 0]));
    }

    #[test]
    fn composing_twice_is_identical() {
        let source = RgbImage::from_fn(90, 120, |x, y| Rgb([x as u8, y as u8, (x ^ y) as u8]));
        let rectified = RgbImage::from_fn(21, 30, |x, y| Rgb([(x * 9) as u8, (y * 7) as u8, 3]));
        let geometry = OutputGeometry {
            width: 21,
            height: 30,
        };

        let first = compose_comparison(&source, &rectified, geometry);
        let second = compose_comparison(&source, &rectified, geometry);
        assert_eq!(first.as_raw(), second.as_raw());
    }

    #[test]
    fn zero_width_geometry_leaves_only_the_separator() {
        let source = RgbImage::from_pixel(50, 50, Rgb([1, 1, 1]));
        let rectified = RgbImage::new(0, 1);
        let geometry = OutputGeometry {
            width: 0,
            height: 1,
        };

        let out = compose_comparison(&source, &rectified, geometry);
        assert_eq!(out.dimensions(), (SEPARATOR_WIDTH, 1));
        assert!(out.pixels().all(|p| *p == SEPARATOR_COLOR));
    }
}
