//! Centralized configuration paths for nvim-wizard
//!
//! All config files live under:
//! - Unix/macOS: `~/.config/nvim-wizard/`
//! - Windows: `%APPDATA%\nvim-wizard\`
//!
//! This module is the single source of truth for config paths.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "nvim-wizard";

/// Prefix of the daily-rotated log files
pub const LOG_FILE_PREFIX: &str = "nvim-wizard.log";

/// Base config directory for nvim-wizard
///
/// Unix/macOS:
///   - If XDG_CONFIG_HOME is set: `$XDG_CONFIG_HOME/nvim-wizard`
///   - Else: `~/.config/nvim-wizard`
///
/// Windows:
///   - `%APPDATA%\nvim-wizard`
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// `~/.config/nvim-wizard/config.yaml`
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// `~/.config/nvim-wizard/keymap.yaml`
pub fn keymap_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("keymap.yaml"))
}

/// `~/.config/nvim-wizard/selection.yaml`
pub fn selection_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("selection.yaml"))
}

/// `~/.config/nvim-wizard/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// The editor's own config directory (`~/.config/nvim`, `%LOCALAPPDATA%\nvim`)
///
/// Used as the default target of directory delivery.
pub fn nvim_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("LOCALAPPDATA")
            .ok()
            .map(|local| PathBuf::from(local).join("nvim"))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join("nvim"))
    }
}

pub(crate) fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

/// Ensure the base config dir exists, returning it
pub fn ensure_config_dir() -> Result<PathBuf, String> {
    let dir = config_dir().ok_or_else(|| "No config directory available".to_string())?;
    ensure_dir(&dir)?;
    Ok(dir)
}

/// Ensure logs dir exists, returning it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let config = ensure_config_dir()?;
    let logs = config.join("logs");
    ensure_dir(&logs)?;
    Ok(logs)
}
