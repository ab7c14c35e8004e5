// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! egui-backed display surface for the ROI selector.

use crate::models::config::OverlayStyle;
use crate::ui::roi_selector::DisplaySurface;

/// The canvas area as seen by the selector.
///
/// Coordinates handed to the selector are local to `screen_rect`; drawing
/// translates them back to screen space. The canvas refreshes the placement
/// with [`place`](Self::place) every frame before forwarding events.
pub struct CanvasSurface {
    ctx: egui::Context,
    layer: egui::LayerId,
    screen_rect: egui::Rect,
    has_content: bool,
}

impl CanvasSurface {
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            ctx,
            layer: egui::LayerId::background(),
            screen_rect: egui::Rect::NOTHING,
            has_content: false,
        }
    }

    /// Update where the surface sits on screen this frame.
    pub fn place(&mut self, screen_rect: egui::Rect, layer: egui::LayerId, has_content: bool) {
        self.screen_rect = screen_rect;
        self.layer = layer;
        self.has_content = has_content;
    }

    pub fn screen_rect(&self) -> egui::Rect {
        self.screen_rect
    }

    /// Convert a screen position to surface-local coordinates.
    pub fn to_local(&self, pos: egui::Pos2) -> egui::Pos2 {
        (pos - self.screen_rect.min).to_pos2()
    }

    /// Convert a surface-local rectangle to screen coordinates.
    pub fn to_screen(&self, rect: egui::Rect) -> egui::Rect {
        rect.translate(self.screen_rect.min.to_vec2())
    }

    fn painter(&self) -> egui::Painter {
        egui::Painter::new(self.ctx.clone(), self.layer, self.screen_rect)
    }
}

impl DisplaySurface for CanvasSurface {
    fn request_repaint(&mut self) {
        self.ctx.request_repaint();
    }

    fn has_content(&self) -> bool {
        self.has_content
    }

    fn draw_dashed_rect(&mut self, rect: egui::Rect, style: &OverlayStyle) {
        let rect = self.to_screen(rect);
        let outline = [
            rect.left_top(),
            rect.right_top(),
            rect.right_bottom(),
            rect.left_bottom(),
            rect.left_top(),
        ];
        self.painter().extend(egui::Shape::dashed_line(
            &outline,
            style.stroke(),
            style.dash_length,
            style.gap_length,
        ));
    }
}
