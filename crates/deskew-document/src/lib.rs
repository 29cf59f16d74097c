// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// deskew-document — Document rectification for Deskew.
//
// Provides raster loading and saving, the four-corner selection state machine
// with its on-screen annotations, the corner homography and perspective warp,
// the side-by-side comparison compositor, and the pipeline tying them together.

pub mod pipeline;
pub mod raster;
pub mod rectify;
pub mod select;

// Re-export the primary types so callers can use `deskew_document::Rectifier` etc.
pub use pipeline::{ComparisonViewer, CornerPicker, Outcome, Pipeline};
pub use raster::processor::ImageProcessor;
pub use rectify::{Homography, Rectifier, compose_comparison};
pub use select::{Annotator, CornerSelection, PickerInput, SelectionState};
