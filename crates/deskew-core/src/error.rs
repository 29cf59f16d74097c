// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Deskew.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all Deskew operations.
#[derive(Debug, Error)]
pub enum DeskewError {
    // -- Configuration --
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown paper size: {0}")]
    UnknownPaperSize(String),

    // -- Source image --
    #[error("image not found: {}", .0.display())]
    ImageNotFound(PathBuf),

    #[error("failed to load image {}: {reason}", .path.display())]
    ImageDecode { path: PathBuf, reason: String },

    // -- Selection / geometry --
    #[error("exactly 4 corners required, got {selected}")]
    IncompleteSelection { selected: usize },

    #[error("degenerate corner quadrilateral: {0}")]
    DegenerateQuad(String),

    #[error("label font could not be loaded: {0}")]
    LabelFont(String),

    // -- Output --
    #[error("failed to write image to {}: {reason}", .path.display())]
    ImageWrite { path: PathBuf, reason: String },

    #[error("display error: {0}")]
    Display(String),

    // -- Config file --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DeskewError>;
