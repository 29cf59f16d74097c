// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor: load a source raster from disk and save results.
// Operates on in-memory images using the `image` crate.

use std::path::Path;

use deskew_core::error::{DeskewError, Result};
use image::{DynamicImage, RgbImage};
use tracing::{debug, info, instrument};

/// A single in-memory image on its way in from, or out to, the filesystem.
///
/// ```ignore
/// let source = ImageProcessor::open("page.jpg")?.into_rgb8();
/// ImageProcessor::from_rgb8(comparison).save("doc-homography.png")?;
/// ```
pub struct ImageProcessor {
    /// The current working image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path.
    ///
    /// A missing file and an undecodable file are reported as distinct errors.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DeskewError::ImageNotFound(path.to_path_buf()));
        }
        let img = image::open(path).map_err(|err| DeskewError::ImageDecode {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        info!(width = img.width(), height = img.height(), "Image loaded");
        Ok(Self { image: img })
    }

    /// Wrap an RGB raster.
    pub fn from_rgb8(image: RgbImage) -> Self {
        Self {
            image: DynamicImage::ImageRgb8(image),
        }
    }

    // -- Accessors ------------------------------------------------------------

    /// Current image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Current image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Consume the processor and return a 3-channel raster. Alpha is dropped
    /// and grayscale is expanded.
    pub fn into_rgb8(self) -> RgbImage {
        self.image.into_rgb8()
    }

    // -- Output ---------------------------------------------------------------

    /// Write the image to a file, replacing anything already there. The
    /// format is inferred from the file extension.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.image
            .save(path)
            .map_err(|err| DeskewError::ImageWrite {
                path: path.to_path_buf(),
                reason: err.to_string(),
            })?;
        debug!(width = self.width(), height = self.height(), "Image written");
        Ok(())
    }
}
