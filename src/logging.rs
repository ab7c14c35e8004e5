// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Logging setup.
//!
//! Records go to `<log_dir>/<project_name>.log` when a log directory is
//! configured, otherwise to stderr. `RUST_LOG` overrides the configured level.

use crate::models::config::AppConfig;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// Log file for a project inside `log_dir`, or `None` when file logging is off.
pub fn log_file_path(log_dir: &Path, project_name: &str) -> Option<PathBuf> {
    if log_dir.as_os_str().is_empty() {
        return None;
    }
    Some(log_dir.join(format!("{}.log", project_name)))
}

/// Initialize the global logger. Returns the log file in use, if any.
pub fn init(config: &AppConfig) -> Result<Option<PathBuf>> {
    let env = env_logger::Env::default().default_filter_or(config.log_level.as_str());
    let mut builder = env_logger::Builder::from_env(env);

    let path = log_file_path(&config.log_dir, &config.project_name);
    if let Some(ref path) = path {
        std::fs::create_dir_all(&config.log_dir)
            .with_context(|| format!("Cannot create log directory {}", config.log_dir.display()))?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Cannot open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder
        .try_init()
        .context("Logger already initialized")?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_path() {
        assert_eq!(
            log_file_path(Path::new("logs"), "Camera_Stans"),
            Some(PathBuf::from("logs/Camera_Stans.log"))
        );
        assert_eq!(log_file_path(Path::new(""), "Camera_Stans"), None);
    }
}
