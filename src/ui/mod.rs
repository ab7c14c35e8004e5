// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the Camera Stans application.

pub mod canvas;
pub mod roi_selector;
pub mod surface;
pub mod toolbar;
