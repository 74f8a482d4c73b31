//! XDG Base Directory support for quill.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "quill";

fn app_dir(base: Option<PathBuf>, kind: &str) -> Result<PathBuf> {
    base.map(|p| p.join(APP_NAME))
        .with_context(|| format!("Failed to determine {} directory", kind))
}

/// Configuration directory: `$XDG_CONFIG_HOME/quill` or `~/.config/quill`.
pub fn get_config_dir() -> Result<PathBuf> {
    app_dir(dirs::config_dir(), "config")
}

/// Cache directory, home of the log file: `$XDG_CACHE_HOME/quill` or `~/.cache/quill`.
pub fn get_cache_dir() -> Result<PathBuf> {
    app_dir(dirs::cache_dir(), "cache")
}
