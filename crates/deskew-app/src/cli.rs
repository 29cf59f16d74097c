// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line and environment parameters.

use std::path::PathBuf;

use clap::Parser;
use deskew_core::error::Result;
use deskew_core::{PaperSize, RectifierConfig};

/// Pick the four corners of a photographed document and write a
/// perspective-corrected copy next to the original.
///
/// Every value can come from a flag, an environment variable, or a JSON
/// config file, in that order of precedence.
#[derive(Debug, Parser)]
#[command(name = "deskew", version)]
pub struct Args {
    /// JSON file holding any of the settings below.
    #[arg(long, env = "DESKEW_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Photo of the document to rectify.
    #[arg(long, env = "DESKEW_IMAGE_PATH", value_name = "FILE")]
    pub image_path: Option<PathBuf>,

    /// Where to write the side-by-side comparison [default: doc-homography.png].
    #[arg(long, env = "DESKEW_OUTPUT_PATH", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Height of the rectified page in pixels [default: 1000].
    #[arg(long, env = "DESKEW_OUTPUT_HEIGHT", value_name = "PX")]
    pub output_height: Option<u32>,

    /// Paper proportions for the output: a3, a4, a5, letter, legal [default: a4].
    #[arg(long, env = "DESKEW_PAPER_SIZE", value_name = "SIZE")]
    pub paper_size: Option<PaperSize>,
}

impl Args {
    /// Layer flags over the config file over the built-in defaults, then
    /// validate.
    pub fn into_config(self) -> Result<RectifierConfig> {
        let mut config = match &self.config {
            Some(path) => RectifierConfig::from_json_file(path)?,
            None => RectifierConfig::default(),
        };
        if let Some(image_path) = self.image_path {
            config.image_path = image_path;
        }
        if let Some(output_path) = self.output_path {
            config.output_path = output_path;
        }
        if let Some(output_height) = self.output_height {
            config.output_height = output_height;
        }
        if let Some(paper_size) = self.paper_size {
            config.paper_size = paper_size;
        }
        config.validate()?;
        Ok(config)
    }
}
