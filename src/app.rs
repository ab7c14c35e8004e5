// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait. It owns the displayed image and the ROI selector,
//! and wires toolbar, keyboard and canvas input to the selector.

use crate::models::{config::AppConfig, roi::Roi};
use crate::ui::canvas::{self, CanvasSelector, DisplayedImage};
use crate::ui::roi_selector::RoiSelector;
use crate::ui::surface::CanvasSurface;
use crate::ui::toolbar;
use crate::util::geometry::{LetterboxMapper, SharedLetterbox};
use std::sync::mpsc::{channel, Receiver};

/// Current tool selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Inspect,
    Roi,
}

/// Result of background image loading operation.
struct LoadedImageData {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

/// Main application state.
pub struct CameraStansApp {
    config: AppConfig,

    /// Currently selected tool
    current_tool: Tool,

    /// ROI selector bound to the canvas
    selector: CanvasSelector,

    /// Letterbox of the displayed image, shared with the selector's mapper
    layout: SharedLetterbox,

    /// ROI change notifications from the selector
    roi_events: Receiver<Option<Roi>>,

    /// Loaded image texture for display
    image_texture: Option<egui::TextureHandle>,

    /// Image dimensions (width, height)
    image_size: Option<(u32, u32)>,

    /// Receiver for background image loading
    image_loader: Option<Receiver<Result<LoadedImageData, String>>>,

    /// Loading state message
    loading_message: Option<String>,

    /// `clear()` calls whose notification has not been drained yet
    pending_clears: usize,

    /// Last status line
    status: String,
}

impl CameraStansApp {
    /// Create a new application instance drawing into `ctx`.
    pub fn new(ctx: egui::Context, config: AppConfig) -> Self {
        let layout = SharedLetterbox::default();
        let mut selector = RoiSelector::new(
            CanvasSurface::new(ctx),
            LetterboxMapper::new(layout.clone()),
        )
        .with_style(config.overlay.clone());

        let (sender, roi_events) = channel();
        selector.subscribe(move |roi| {
            let _ = sender.send(roi);
        });

        Self {
            config,
            current_tool: Tool::Inspect,
            selector,
            layout,
            roi_events,
            image_texture: None,
            image_size: None,
            image_loader: None,
            loading_message: None,
            pending_clears: 0,
            status: "Ready".to_string(),
        }
    }

    /// Switch tools, activating the selector only for the ROI tool.
    fn set_tool(&mut self, tool: Tool) {
        self.current_tool = tool;
        self.selector.set_active(tool == Tool::Roi);
        log::debug!("Tool changed to {:?} (selector active: {})", tool, self.selector.is_active());
    }

    /// Discard the committed ROI, remembering that the next empty
    /// notification comes from this clear rather than from a failed drag.
    fn clear_roi(&mut self) {
        self.pending_clears += 1;
        self.selector.clear();
    }

    /// Load an image file and create a texture for display (asynchronously).
    pub fn load_image_file(&mut self, path: std::path::PathBuf) {
        let (sender, receiver) = channel();
        self.image_loader = Some(receiver);
        self.loading_message = Some("Loading image...".to_string());

        // Spawn background thread for loading
        std::thread::spawn(move || {
            let result = crate::io::media::load_image(&path)
                .map(|loaded_img| {
                    log::info!("Loaded image: {} ({}x{})", path.display(), loaded_img.width, loaded_img.height);
                    LoadedImageData {
                        width: loaded_img.width,
                        height: loaded_img.height,
                        pixels: loaded_img.pixels,
                    }
                })
                .map_err(|e| format!("Failed to load image: {:#}", e));

            let _ = sender.send(result);
        });
    }

    /// Pick up a finished background load, if any.
    fn poll_image_loader(&mut self, ctx: &egui::Context) {
        let Some(ref receiver) = self.image_loader else {
            return;
        };
        let Ok(result) = receiver.try_recv() else {
            return;
        };
        self.image_loader = None;
        self.loading_message = None;

        match result {
            Ok(loaded_data) => {
                // Create egui texture from the loaded image data
                let size = [loaded_data.width as usize, loaded_data.height as usize];
                let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &loaded_data.pixels);
                let texture = ctx.load_texture("loaded_image", color_image, egui::TextureOptions::LINEAR);

                self.image_texture = Some(texture);
                self.image_size = Some((loaded_data.width, loaded_data.height));

                // A ROI from the previous image means nothing here
                if self.selector.current_roi().is_some() {
                    self.clear_roi();
                }
                log::info!("Image loaded successfully");
            }
            Err(e) => {
                log::error!("{}", e);
                self.status = e;
            }
        }
    }

    /// Turn selector notifications into status text.
    fn drain_roi_events(&mut self) {
        while let Ok(roi) = self.roi_events.try_recv() {
            self.status = match roi {
                Some(roi) => format!("ROI selected: {}", roi),
                None if self.pending_clears > 0 => {
                    self.pending_clears -= 1;
                    "ROI cleared".to_string()
                }
                None if self.selector.current_roi().is_some() => {
                    "Selection ignored, previous ROI kept".to_string()
                }
                None => "Selection ignored".to_string(),
            };
        }
    }
}

impl eframe::App for CameraStansApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for completed image loading
        self.poll_image_loader(ctx);

        // Request repaint if still loading (to update spinner)
        if self.loading_message.is_some() {
            ctx.request_repaint();
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Image...").clicked() {
                        // Open native file picker
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", crate::io::media::IMAGE_EXTENSIONS)
                            .pick_file()
                        {
                            self.load_image_file(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        // Toolbar
        let mut tool = self.current_tool;
        let has_roi = self.selector.current_roi().is_some();
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| toolbar::show(ui, &mut tool, has_roi))
            .inner;
        if tool != self.current_tool {
            self.set_tool(tool);
        }
        if toolbar_action == toolbar::ToolbarAction::ClearRoi {
            self.clear_roi();
        }

        // Handle keyboard events
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) && self.current_tool == Tool::Roi {
            self.set_tool(Tool::Inspect);
        }

        if !ctx.wants_keyboard_input()
            && ctx.input(|i| i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace))
            && self.selector.current_roi().is_some()
        {
            self.clear_roi();
        }

        // Status bar
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(&self.status);
        });

        // Main canvas (center)
        let canvas_action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                // Show loading overlay if loading
                if let Some(ref message) = self.loading_message {
                    ui.centered_and_justified(|ui| {
                        ui.vertical_centered(|ui| {
                            ui.add_space(20.0);
                            ui.spinner();
                            ui.add_space(10.0);
                            ui.label(
                                egui::RichText::new(message)
                                    .size(16.0)
                                    .color(egui::Color32::from_gray(200)),
                            );
                        });
                    });
                    canvas::CanvasAction::None
                } else {
                    let image = match (&self.image_texture, self.image_size) {
                        (Some(texture), Some(size)) => Some(DisplayedImage { texture, size }),
                        _ => None,
                    };
                    canvas::show(
                        ui,
                        &mut self.selector,
                        &self.layout,
                        image,
                        self.current_tool,
                        self.config.roi_color32(),
                    )
                }
            })
            .inner;

        // Handle canvas actions
        match canvas_action {
            canvas::CanvasAction::Probe(Some((x, y))) => {
                self.status = format!("Pixel ({}, {})", x, y);
            }
            canvas::CanvasAction::Probe(None) => {
                self.status = "Outside image".to_string();
            }
            canvas::CanvasAction::None => {}
        }

        self.drain_roi_events();
    }
}
