// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Configuration file loading.
//!
//! Configuration can be written in YAML or JSON; the format is picked from
//! the file extension.

use crate::models::config::AppConfig;
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV: &str = "CAMERA_STANS_CONFIG";

/// Configuration file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "camera_stans.yaml";

/// Import configuration from YAML format.
pub fn import_yaml(path: &Path) -> Result<AppConfig> {
    let yaml = std::fs::read_to_string(path)?;
    let config = serde_yaml::from_str(&yaml)?;
    Ok(config)
}

/// Import configuration from JSON format.
pub fn import_json(path: &Path) -> Result<AppConfig> {
    let json = std::fs::read_to_string(path)?;
    let config = serde_json::from_str(&json)?;
    Ok(config)
}

/// Load a configuration file, dispatching on its extension.
pub fn load(path: &Path) -> Result<AppConfig> {
    let extension = path.extension().and_then(|s| s.to_str());
    let config = match extension {
        Some("yaml") | Some("yml") => import_yaml(path),
        Some("json") => import_json(path),
        _ => bail!("Unsupported config file extension: {:?}", extension),
    };
    config.with_context(|| format!("Failed to load config from {}", path.display()))
}

/// Resolve which configuration file to use, if any.
///
/// An explicit path from the environment wins; otherwise the default file is
/// used only when it exists.
pub fn resolve_path(env_value: Option<PathBuf>, default_file: &Path) -> Option<PathBuf> {
    env_value.or_else(|| default_file.exists().then(|| default_file.to_path_buf()))
}

/// Load the configuration for this process, falling back to defaults.
pub fn load_or_default() -> Result<AppConfig> {
    let env_value = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    match resolve_path(env_value, Path::new(DEFAULT_CONFIG_FILE)) {
        Some(path) => load(&path),
        None => Ok(AppConfig::default()),
    }
}
