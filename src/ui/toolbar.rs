// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar and tool selection UI.
//!
//! This module provides the toolbar interface for switching between the
//! inspect and ROI tools and clearing the current ROI.

use crate::app::Tool;

/// Result of toolbar interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    ClearRoi,
}

/// Display the toolbar with tool selection buttons.
pub fn show(ui: &mut egui::Ui, current_tool: &mut Tool, has_roi: bool) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Tools:");

        ui.separator();

        // Inspect tool
        if ui.selectable_label(*current_tool == Tool::Inspect, "🔍 Inspect").clicked() {
            *current_tool = Tool::Inspect;
        }

        // ROI tool
        if ui.selectable_label(*current_tool == Tool::Roi, "▭ ROI").clicked() {
            *current_tool = Tool::Roi;
        }

        ui.separator();

        if ui.add_enabled(has_roi, egui::Button::new("Clear ROI")).clicked() {
            action = ToolbarAction::ClearRoi;
        }

        ui.separator();

        // Tool description
        let tool_text = match current_tool {
            Tool::Inspect => "Click the image to read pixel coordinates",
            Tool::Roi => "Drag to select a region, press Escape to stop",
        };

        ui.label(egui::RichText::new(tool_text).italics().weak());
    });

    action
}
