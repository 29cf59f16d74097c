// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Corner picker window. Pointer presses and Escape become `PickerInput`
// messages for the selection state machine; the finished selection is handed
// back to the pipeline over a channel once the window closes.

use std::sync::mpsc::{self, Sender};

use deskew_core::DeskewError;
use deskew_core::error::Result;
use deskew_document::select::Transition;
use deskew_document::{Annotator, CornerPicker, CornerSelection, PickerInput};
use eframe::egui;
use image::RgbImage;
use tracing::debug;

use super::{ImageFrame, color_image, full_uv, image_size, native_options};

const WINDOW_TITLE: &str = "Select Corners";

/// Runs the picker in a native window.
pub struct WindowPicker;

impl CornerPicker for WindowPicker {
    fn pick(&mut self, image: &RgbImage) -> Result<CornerSelection> {
        let (tx, rx) = mpsc::channel();
        let app = PickerApp::new(image, tx)?;

        eframe::run_native(
            WINDOW_TITLE,
            native_options(WINDOW_TITLE, image),
            Box::new(move |_cc| Ok(Box::new(app))),
        )
        .map_err(|e| DeskewError::Display(e.to_string()))?;

        // No message means the window went away without a final frame.
        Ok(rx.try_recv().unwrap_or_else(|_| {
            let mut selection = CornerSelection::new();
            selection.apply(PickerInput::Cancel);
            selection
        }))
    }
}

struct PickerApp {
    selection: CornerSelection,
    annotator: Annotator,
    image_size: egui::Vec2,
    /// Uploaded texture and the annotator revision it shows.
    texture: Option<(egui::TextureHandle, u64)>,
    /// Taken once the selection is reported.
    reply: Option<Sender<CornerSelection>>,
}

impl PickerApp {
    fn new(image: &RgbImage, reply: Sender<CornerSelection>) -> Result<Self> {
        Ok(Self {
            selection: CornerSelection::new(),
            annotator: Annotator::new(image)?,
            image_size: image_size(image),
            texture: None,
            reply: Some(reply),
        })
    }

    fn sync_texture(&mut self, ctx: &egui::Context) -> egui::TextureId {
        let revision = self.annotator.revision();
        match &mut self.texture {
            Some((handle, shown)) => {
                if *shown != revision {
                    handle.set(
                        color_image(self.annotator.image()),
                        egui::TextureOptions::LINEAR,
                    );
                    *shown = revision;
                }
                handle.id()
            }
            None => {
                let handle = ctx.load_texture(
                    "picker",
                    color_image(self.annotator.image()),
                    egui::TextureOptions::LINEAR,
                );
                let id = handle.id();
                self.texture = Some((handle, revision));
                id
            }
        }
    }

    fn handle(&mut self, input: PickerInput) {
        if let Transition::Accepted { index, point } = self.selection.apply(input) {
            self.annotator.mark(index, point);
        }
    }

    /// Report the selection and close the window.
    fn finish(&mut self, ctx: &egui::Context) {
        if let Some(reply) = self.reply.take() {
            debug!(state = ?self.selection.state(), "Picker finished");
            // The receiver outlives the event loop.
            let _ = reply.send(self.selection.clone());
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}

impl eframe::App for PickerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let texture = self.sync_texture(ctx);
        let mut inputs = Vec::new();

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_rect_before_wrap();
            let response = ui.allocate_rect(available, egui::Sense::click());
            let frame = ImageFrame::fit(available, self.image_size);
            ui.painter()
                .image(texture, frame.rect, full_uv(), egui::Color32::WHITE);

            let pressed = ctx.input(|i| {
                i.pointer
                    .primary_pressed()
                    .then(|| i.pointer.interact_pos())
                    .flatten()
            });
            if let Some(pos) = pressed.filter(|_| response.hovered()) {
                inputs.push(PickerInput::Click(frame.to_image(pos)));
            }

            if let Some(corner) = self.selection.next_corner() {
                ui.painter().text(
                    available.left_top() + egui::vec2(8.0, 8.0),
                    egui::Align2::LEFT_TOP,
                    format!(
                        "Click {} ({} of 4), Esc to cancel",
                        corner.abbreviation(),
                        self.selection.len() + 1
                    ),
                    egui::FontId::proportional(16.0),
                    egui::Color32::YELLOW,
                );
            }
        });

        let cancelled = ctx.input(|i| {
            i.key_pressed(egui::Key::Escape) || i.viewport().close_requested()
        });
        if cancelled {
            inputs.push(PickerInput::Cancel);
        }

        for input in inputs {
            self.handle(input);
        }
        if self.selection.is_finished() {
            self.finish(ctx);
        }
    }
}
