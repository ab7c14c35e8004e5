// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for image display and ROI selection.
//!
//! This module provides the main canvas area: it draws the loaded image
//! letterboxed into the available space, forwards pointer input to the ROI
//! selector, and draws the committed ROI on top of the image.

use crate::app::Tool;
use crate::models::roi::{ImagePoint, Roi};
use crate::ui::roi_selector::{PointerEvent, RoiSelector};
use crate::ui::surface::CanvasSurface;
use crate::util::geometry::{Letterbox, LetterboxMapper, SharedLetterbox};

/// Space left below the canvas for the tool info row.
const TOOL_ROW_HEIGHT: f32 = 28.0;

pub type CanvasSelector = RoiSelector<CanvasSurface, LetterboxMapper>;

/// Image shown on the canvas.
pub struct DisplayedImage<'a> {
    pub texture: &'a egui::TextureHandle,
    pub size: (u32, u32),
}

/// Result of canvas interaction.
pub enum CanvasAction {
    None,
    /// A click the selector did not consume; carries the image pixel under
    /// the pointer, `None` in the letterbox padding.
    Probe(Option<ImagePoint>),
}

/// Display the main canvas area and handle mouse interactions.
pub fn show(
    ui: &mut egui::Ui,
    selector: &mut CanvasSelector,
    layout: &SharedLetterbox,
    image: Option<DisplayedImage<'_>>,
    current_tool: Tool,
    roi_color: egui::Color32,
) -> CanvasAction {
    let mut action = CanvasAction::None;
    // Set background color
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    // Create a frame for the canvas
    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        let size = (ui.available_size() - egui::vec2(0.0, TOOL_ROW_HEIGHT)).max(egui::Vec2::ZERO);
        let (rect, _response) = ui.allocate_exact_size(size, egui::Sense::click_and_drag());

        let letterbox = image
            .as_ref()
            .and_then(|img| Letterbox::fit(rect.size(), img.size));
        layout.set(letterbox);
        selector
            .surface_mut()
            .place(rect, ui.layer_id(), letterbox.is_some());

        match (&image, letterbox) {
            (Some(img), Some(lb)) => {
                ui.painter().image(
                    img.texture.id(),
                    selector.surface().to_screen(lb.display_rect),
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }
            _ => show_welcome(ui, rect),
        }

        for event in pointer_events(ui, selector.surface()) {
            let consumed = selector.handle_pointer_event(event);
            if consumed {
                continue;
            }
            // Default handling: probe the pixel under a primary click
            if let PointerEvent::Press { pos, button: egui::PointerButton::Primary } = event {
                action = CanvasAction::Probe(letterbox.and_then(|lb| lb.surface_to_image(pos)));
            }
        }

        // The selector only draws the drag in progress
        selector.handle_repaint_request();

        if let (Some(roi), Some(lb)) = (selector.current_roi(), letterbox) {
            draw_roi(ui.painter(), selector.surface(), &lb, &roi, roi_color);
        }
    });

    // Display current tool info at the bottom
    ui.separator();
    ui.horizontal(|ui| {
        ui.label(format!("Current tool: {:?}", current_tool));
        ui.separator();
        match selector.current_roi() {
            Some(roi) => ui.label(format!("ROI: {}", roi)),
            None => ui.label("No ROI"),
        };
        if image.is_none() {
            ui.separator();
            ui.label("No file loaded");
        }
    });

    action
}

/// Translate this frame's raw pointer input into selector events.
///
/// Presses only count inside the canvas; moves and releases are forwarded
/// wherever they happen so a drag can end outside it.
fn pointer_events(ui: &egui::Ui, surface: &CanvasSurface) -> Vec<PointerEvent> {
    let screen_rect = surface.screen_rect();
    ui.input(|i| {
        i.events
            .iter()
            .filter_map(|event| match event {
                egui::Event::PointerButton { pos, button, pressed: true, .. } => screen_rect
                    .contains(*pos)
                    .then(|| PointerEvent::Press { pos: surface.to_local(*pos), button: *button }),
                egui::Event::PointerButton { pos, button, pressed: false, .. } => {
                    Some(PointerEvent::Release { pos: surface.to_local(*pos), button: *button })
                }
                egui::Event::PointerMoved(pos) => Some(PointerEvent::Move { pos: surface.to_local(*pos) }),
                _ => None,
            })
            .collect()
    })
}

/// Draw the committed ROI with a solid outline.
fn draw_roi(
    painter: &egui::Painter,
    surface: &CanvasSurface,
    letterbox: &Letterbox,
    roi: &Roi,
    color: egui::Color32,
) {
    let rect = surface.to_screen(letterbox.roi_to_surface(roi));
    painter.rect_stroke(rect, 0.0, egui::Stroke::new(2.0, color));
    painter.text(
        rect.left_top() + egui::vec2(2.0, -2.0),
        egui::Align2::LEFT_BOTTOM,
        format!("{}x{}", roi.w(), roi.h()),
        egui::FontId::monospace(12.0),
        color,
    );
}

/// Show welcome message when no file is loaded.
fn show_welcome(ui: &egui::Ui, rect: egui::Rect) {
    let painter = ui.painter();
    let center = rect.center();
    painter.text(
        center - egui::vec2(0.0, 30.0),
        egui::Align2::CENTER_CENTER,
        "Camera Stans",
        egui::FontId::proportional(32.0),
        egui::Color32::from_gray(200),
    );
    painter.text(
        center,
        egui::Align2::CENTER_CENTER,
        "Open an image to select a region of interest",
        egui::FontId::proportional(14.0),
        egui::Color32::from_gray(180),
    );
    painter.text(
        center + egui::vec2(0.0, 24.0),
        egui::Align2::CENTER_CENTER,
        "File → Open Image...",
        egui::FontId::proportional(12.0),
        egui::Color32::from_gray(130),
    );
}
