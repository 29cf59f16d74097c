// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Deskew — interactive four-corner document rectifier
//
// Entry point. Initialises logging, resolves the configuration, and runs the
// rectification pipeline with the eframe picker and viewer windows.

mod cli;
mod windows;

use std::process::ExitCode;

use clap::Parser;
use deskew_document::{Outcome, Pipeline};

use cli::Args;
use windows::{WindowPicker, WindowViewer};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Deskew starting");

    let config = match Args::parse().into_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "configuration rejected");
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(?config, "configuration resolved");

    let pipeline = Pipeline::new(config);
    match pipeline.run(&mut WindowPicker, &mut WindowViewer) {
        Ok(Outcome::Written { path, width, height }) => {
            tracing::info!(path = %path.display(), width, height, "done");
            ExitCode::SUCCESS
        }
        Ok(Outcome::Cancelled { selected }) => {
            tracing::info!(selected, "exiting without output");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "rectification failed");
            ExitCode::FAILURE
        }
    }
}
