//! Wizard configuration persistence
//!
//! Stores delivery preferences in `~/.config/nvim-wizard/config.yaml`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Port the companion listener binds by default
pub const DEFAULT_LISTENER_PORT: u16 = 45831;

/// Wizard configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardConfig {
    /// Port of the companion listener running inside the editor
    #[serde(default = "default_listener_port")]
    pub listener_port: u16,

    /// Bearer token expected by the listener, if it was started with one
    #[serde(default)]
    pub listener_token: Option<String>,

    /// Directory downloads are written to when no explicit path is given
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Editor config directory used by directory delivery
    #[serde(default)]
    pub target_dir: Option<PathBuf>,

    /// Base URL of the web wizard, used for share links
    #[serde(default = "default_web_app_url")]
    pub web_app_url: String,

    /// Leader key for new selections
    #[serde(default = "default_leader_key")]
    pub leader_key: String,
}

fn default_listener_port() -> u16 {
    DEFAULT_LISTENER_PORT
}

fn default_web_app_url() -> String {
    "https://nvim-wizard.dev/".to_string()
}

fn default_leader_key() -> String {
    crate::selection::DEFAULT_LEADER.to_string()
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            listener_port: default_listener_port(),
            listener_token: None,
            output_dir: None,
            target_dir: None,
            web_app_url: default_web_app_url(),
            leader_key: default_leader_key(),
        }
    }
}

impl WizardConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file; never fails
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            crate::config_paths::ensure_dir(parent)?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Directory delivery target: the configured one, else the editor's
    pub fn resolved_target_dir(&self) -> Option<PathBuf> {
        self.target_dir
            .clone()
            .or_else(crate::config_paths::nvim_config_dir)
    }

    /// Base URL of the listener, e.g. `http://127.0.0.1:45831`
    pub fn listener_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.listener_port)
    }
}
