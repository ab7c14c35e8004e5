// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model: the ROI value type and application configuration.

pub mod config;
pub mod roi;
