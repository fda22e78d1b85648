//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use pdb_core::Config;
use std::path::Path;

use crate::cli::GlobalArgs;

/// Load the config named by `--config`, or look in the project directory
/// and fall back to defaults when nothing is there
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    match &global.config {
        Some(path) => {
            Config::load(Path::new(path)).with_context(|| format!("Failed to load config {path}"))
        }
        None => Config::load_or_default(Path::new(&global.project_dir))
            .context("Failed to load project config"),
    }
}

/// Human-readable file size
pub(crate) fn format_size(bytes: usize) -> String {
    match bytes {
        b if b >= 1024 * 1024 => format!("{:.1} MB", b as f64 / (1024.0 * 1024.0)),
        b if b >= 1024 => format!("{:.1} KB", b as f64 / 1024.0),
        b => format!("{b} bytes"),
    }
}
