// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the keep-aspect-ratio fit of an image inside a
//! display surface and the coordinate transformations between surface
//! space and image pixel space.

use crate::models::roi::{ImagePoint, Roi};
use crate::ui::roi_selector::CoordinateMapper;
use std::cell::Cell;
use std::rc::Rc;

/// Placement of an image scaled to fit a surface, centred with padding.
///
/// All rectangles are in surface-local coordinates (origin at the surface's
/// top-left corner).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    /// Native image size in pixels.
    pub image_size: (u32, u32),
    /// Where the image is drawn inside the surface.
    pub display_rect: egui::Rect,
}

impl Letterbox {
    /// Fit an image into a surface of the given size, preserving aspect ratio.
    ///
    /// Returns `None` for an empty image or an empty surface.
    pub fn fit(surface_size: egui::Vec2, image_size: (u32, u32)) -> Option<Self> {
        let (img_width, img_height) = image_size;
        if img_width == 0 || img_height == 0 || surface_size.x <= 0.0 || surface_size.y <= 0.0 {
            return None;
        }

        let img_aspect = img_width as f32 / img_height as f32;
        let surface_aspect = surface_size.x / surface_size.y;

        let (display_width, display_height) = if img_aspect > surface_aspect {
            // Image is wider - fit to width
            let width = surface_size.x;
            (width, width / img_aspect)
        } else {
            // Image is taller - fit to height
            let height = surface_size.y;
            (height * img_aspect, height)
        };

        let x_offset = (surface_size.x - display_width) / 2.0;
        let y_offset = (surface_size.y - display_height) / 2.0;

        Some(Self {
            image_size,
            display_rect: egui::Rect::from_min_size(
                egui::pos2(x_offset, y_offset),
                egui::vec2(display_width, display_height),
            ),
        })
    }

    /// Surface pixels per image pixel.
    pub fn scale(&self) -> f32 {
        self.display_rect.width() / self.image_size.0 as f32
    }

    /// Map a surface point to image coordinates.
    ///
    /// Returns `None` in the letterbox padding. Results are corner
    /// coordinates in `0..=width` / `0..=height`, so a drag from edge to edge
    /// covers the full image.
    pub fn surface_to_image(&self, point: egui::Pos2) -> Option<ImagePoint> {
        if !self.display_rect.contains(point) {
            return None;
        }
        let scale = self.scale();
        let (width, height) = self.image_size;
        let ix = ((point.x - self.display_rect.min.x) / scale).round();
        let iy = ((point.y - self.display_rect.min.y) / scale).round();
        Some((
            (ix as i32).clamp(0, width as i32),
            (iy as i32).clamp(0, height as i32),
        ))
    }

    /// Map image coordinates back to a surface point.
    pub fn image_to_surface(&self, point: ImagePoint) -> egui::Pos2 {
        let scale = self.scale();
        egui::pos2(
            self.display_rect.min.x + point.0 as f32 * scale,
            self.display_rect.min.y + point.1 as f32 * scale,
        )
    }

    /// Surface rectangle covering a ROI.
    pub fn roi_to_surface(&self, roi: &Roi) -> egui::Rect {
        egui::Rect::from_min_max(
            self.image_to_surface((roi.x(), roi.y())),
            self.image_to_surface(roi.max()),
        )
    }
}

/// Shared slot holding the current letterbox; the canvas refreshes it every
/// frame and the mapper reads it.
pub type SharedLetterbox = Rc<Cell<Option<Letterbox>>>;

/// Coordinate mapper backed by the canvas letterbox.
///
/// Maps nothing while no image is displayed.
#[derive(Debug, Clone, Default)]
pub struct LetterboxMapper {
    layout: SharedLetterbox,
}

impl LetterboxMapper {
    pub fn new(layout: SharedLetterbox) -> Self {
        Self { layout }
    }
}

impl CoordinateMapper for LetterboxMapper {
    fn map_to_image(&self, point: egui::Pos2) -> Option<ImagePoint> {
        self.layout.get()?.surface_to_image(point)
    }
}
