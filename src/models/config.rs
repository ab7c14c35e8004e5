// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application configuration.
//!
//! Every field has a default so a partial (or missing) configuration file
//! still yields a usable setup.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project name used in log lines and the log file name.
pub const PROJECT_NAME: &str = "Camera_Stans";

/// Default log directory, relative to the working directory.
pub const LOG_DIR: &str = "logs";

/// Style of the transient rectangle drawn while dragging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    pub color: [u8; 3],
    pub width: f32,
    pub dash_length: f32,
    pub gap_length: f32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            color: [255, 0, 0],
            width: 2.0,
            dash_length: 6.0,
            gap_length: 4.0,
        }
    }
}

impl OverlayStyle {
    pub fn stroke(&self) -> egui::Stroke {
        let [r, g, b] = self.color;
        egui::Stroke::new(self.width, egui::Color32::from_rgb(r, g, b))
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub project_name: String,
    /// Directory for the log file; empty logs to stderr instead.
    pub log_dir: PathBuf,
    pub log_level: String,
    pub window_size: [f32; 2],
    pub overlay: OverlayStyle,
    /// Colour the canvas uses to draw the committed ROI.
    pub roi_color: [u8; 3],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            project_name: PROJECT_NAME.to_string(),
            log_dir: PathBuf::from(LOG_DIR),
            log_level: "info".to_string(),
            window_size: [1280.0, 720.0],
            overlay: OverlayStyle::default(),
            roi_color: [0, 255, 0],
        }
    }
}

impl AppConfig {
    pub fn roi_color32(&self) -> egui::Color32 {
        let [r, g, b] = self.roi_color;
        egui::Color32::from_rgb(r, g, b)
    }
}
