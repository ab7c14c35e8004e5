// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Camera Stans
//!
//! A desktop tool for picking a rectangular region of interest on a
//! displayed image. The selection is reported in native image pixels,
//! regardless of how the image is scaled to fit the window.

mod app;
mod io;
mod logging;
mod models;
mod ui;
mod util;

use anyhow::Result;
use app::CameraStansApp;

fn main() -> Result<()> {
    let config = io::config::load_or_default()?;

    // Initialize logging
    if let Some(path) = logging::init(&config)? {
        eprintln!("Logging to {}", path.display());
    }
    log::info!("Start {}", config.project_name);

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([640.0, 480.0])
            .with_title("Camera Stans - ROI Picker"),
        ..Default::default()
    };

    let project_name = config.project_name.clone();

    // Run the application
    let result = eframe::run_native(
        "Camera Stans",
        options,
        Box::new(move |cc| Ok(Box::new(CameraStansApp::new(cc.egui_ctx.clone(), config)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e));

    finish(&project_name, result)
}

/// Log the outcome and the Stop line, then hand the result back.
fn finish(project_name: &str, result: Result<()>) -> Result<()> {
    if let Err(ref e) = result {
        log::error!("{:#}", e);
    }
    log::info!("Stop {}", project_name);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_propagates_run_error() {
        let err = finish("Camera_Stans", Err(anyhow::anyhow!("Application error: no display")))
            .unwrap_err();
        assert_eq!(err.to_string(), "Application error: no display");
        assert!(finish("Camera_Stans", Ok(())).is_ok());
    }
}
