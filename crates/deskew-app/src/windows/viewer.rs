// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Comparison viewer window; closes on any key press.

use deskew_core::DeskewError;
use deskew_core::error::Result;
use deskew_document::ComparisonViewer;
use eframe::egui;
use image::RgbImage;
use tracing::info;

use super::{ImageFrame, color_image, full_uv, image_size, native_options};

const WINDOW_TITLE: &str = "Comparison";

/// Shows the comparison in a native window until dismissed.
pub struct WindowViewer;

impl ComparisonViewer for WindowViewer {
    fn show(&mut self, comparison: &RgbImage) -> Result<()> {
        let app = ViewerApp {
            pending: Some(color_image(comparison)),
            texture: None,
            image_size: image_size(comparison),
        };

        info!("Showing comparison; press any key to close");
        eframe::run_native(
            WINDOW_TITLE,
            native_options(WINDOW_TITLE, comparison),
            Box::new(move |_cc| Ok(Box::new(app))),
        )
        .map_err(|e| DeskewError::Display(e.to_string()))
    }
}

struct ViewerApp {
    /// Pixels waiting for the first frame to upload them.
    pending: Option<egui::ColorImage>,
    texture: Option<egui::TextureHandle>,
    image_size: egui::Vec2,
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(pixels) = self.pending.take() {
            self.texture =
                Some(ctx.load_texture("comparison", pixels, egui::TextureOptions::LINEAR));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_rect_before_wrap();
            if let Some(texture) = &self.texture {
                let frame = ImageFrame::fit(available, self.image_size);
                ui.painter()
                    .image(texture.id(), frame.rect, full_uv(), egui::Color32::WHITE);
            }
        });

        let dismissed = ctx.input(|i| {
            i.events
                .iter()
                .any(|event| matches!(event, egui::Event::Key { pressed: true, .. }))
        });
        if dismissed {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}
