// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// eframe windows behind the pipeline's picker and viewer seams.

mod picker;
mod viewer;

pub use picker::WindowPicker;
pub use viewer::WindowViewer;

use deskew_core::Point;
use eframe::egui;
use image::RgbImage;

/// Largest initial window, in logical points.
const MAX_WINDOW_SIZE: egui::Vec2 = egui::vec2(1280.0, 900.0);

/// Where a raster is drawn inside the window: scaled to fit, centred.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ImageFrame {
    rect: egui::Rect,
    scale: f32,
}

impl ImageFrame {
    /// Fit an image of `image_size` pixels inside `available`, keeping its
    /// aspect ratio.
    fn fit(available: egui::Rect, image_size: egui::Vec2) -> Self {
        let scale = (available.width() / image_size.x)
            .min(available.height() / image_size.y)
            .max(f32::EPSILON);
        let rect = egui::Rect::from_center_size(available.center(), image_size * scale);
        Self { rect, scale }
    }

    /// Screen position to source pixel. Positions outside the drawn image map
    /// to coordinates outside the source bounds.
    fn to_image(self, pos: egui::Pos2) -> Point {
        let rel = (pos - self.rect.min) / self.scale;
        Point::new(f64::from(rel.x.floor()), f64::from(rel.y.floor()))
    }
}

/// Initial window size for showing an image of `image_size` pixels: the
/// image's own size, shrunk to fit `MAX_WINDOW_SIZE`.
fn initial_window_size(image_size: egui::Vec2) -> egui::Vec2 {
    let shrink = (MAX_WINDOW_SIZE.x / image_size.x)
        .min(MAX_WINDOW_SIZE.y / image_size.y)
        .min(1.0);
    (image_size * shrink).max(egui::vec2(64.0, 64.0))
}

fn image_size(image: &RgbImage) -> egui::Vec2 {
    egui::vec2(image.width() as f32, image.height() as f32)
}

fn color_image(image: &RgbImage) -> egui::ColorImage {
    let size = [image.width() as usize, image.height() as usize];
    egui::ColorImage::from_rgb(size, image.as_raw())
}

/// Full-texture UV rectangle.
fn full_uv() -> egui::Rect {
    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0))
}

fn native_options(title: &str, image: &RgbImage) -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(initial_window_size(image_size(image)))
            .with_title(title),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_centres_and_scales_down() {
        let available = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(500.0, 500.0));
        let frame = ImageFrame::fit(available, egui::vec2(1000.0, 500.0));

        assert!((frame.scale - 0.5).abs() < 1e-6);
        assert_eq!(frame.rect.min, egui::pos2(0.0, 125.0));
        assert_eq!(frame.rect.max, egui::pos2(500.0, 375.0));
    }

    #[test]
    fn screen_positions_map_back_to_source_pixels() {
        let available = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(500.0, 500.0));
        let frame = ImageFrame::fit(available, egui::vec2(1000.0, 500.0));

        assert_eq!(frame.to_image(egui::pos2(0.0, 125.0)), Point::new(0.0, 0.0));
        assert_eq!(frame.to_image(egui::pos2(250.2, 250.0)), Point::new(500.0, 250.0));
        // Above the drawn image: negative y, kept as-is.
        assert_eq!(frame.to_image(egui::pos2(10.0, 100.0)), Point::new(20.0, -50.0));
    }

    #[test]
    fn window_never_exceeds_the_cap() {
        let size = initial_window_size(egui::vec2(4000.0, 3000.0));
        assert!(size.x <= MAX_WINDOW_SIZE.x && size.y <= MAX_WINDOW_SIZE.y);
        assert_eq!(initial_window_size(egui::vec2(300.0, 200.0)), egui::vec2(300.0, 200.0));
    }
}
