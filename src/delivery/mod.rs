//! Delivery adapters: move rendered text to where the editor reads it
//!
//! Every adapter makes a single attempt and reports failure as a
//! [`DeliveryError`]; none of them touch the selection or the text.
//! Connection handles live in a [`DeliveryContext`] owned by the caller.

mod clipboard;
mod directory;
mod file;
pub mod installer;
pub mod listener;

use std::path::{Path, PathBuf};
use std::time::Duration;

pub use clipboard::copy_text;
pub use directory::{backup_file_name, write_init_lua, DirectoryWrite, INIT_LUA};
pub use file::{download, write_file};
pub use listener::{listener_script, ping, save, SaveEncoding, SaveResponse};

#[cfg(feature = "picker")]
pub use directory::pick_target_dir;

use crate::config::WizardConfig;

const LISTENER_TIMEOUT: Duration = Duration::from_secs(5);

/// Error type for delivery operations
#[derive(Debug)]
pub enum DeliveryError {
    /// Clipboard unavailable or write refused
    Clipboard(String),
    /// Filesystem failure writing a file or directory
    Io(String),
    /// No target directory configured or chosen
    NoTarget,
    /// Listener unreachable or the request failed in transit
    Unreachable(String),
    /// Listener answered with a failure
    Rejected { status: u16, message: String },
}

impl std::fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryError::Clipboard(e) => write!(f, "Clipboard error: {}", e),
            DeliveryError::Io(e) => write!(f, "IO error: {}", e),
            DeliveryError::NoTarget => write!(f, "No target directory selected"),
            DeliveryError::Unreachable(e) => write!(f, "Listener unreachable: {}", e),
            DeliveryError::Rejected { status, message } => {
                write!(f, "Listener rejected request (HTTP {}): {}", status, message)
            }
        }
    }
}

impl std::error::Error for DeliveryError {}

/// Session state shared by the delivery adapters
///
/// The clipboard and HTTP agent are created on first use and reused after.
pub struct DeliveryContext {
    config: WizardConfig,
    clipboard: Option<arboard::Clipboard>,
    agent: Option<ureq::Agent>,
    target_dir: Option<PathBuf>,
}

impl DeliveryContext {
    pub fn new(config: WizardConfig) -> Self {
        let target_dir = config.resolved_target_dir();
        Self {
            config,
            clipboard: None,
            agent: None,
            target_dir,
        }
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    /// Directory `init.lua` is written to by directory delivery
    pub fn target_dir(&self) -> Option<&Path> {
        self.target_dir.as_deref()
    }

    pub fn set_target_dir(&mut self, dir: impl Into<PathBuf>) {
        let dir = dir.into();
        tracing::debug!("Delivery target set to {}", dir.display());
        self.target_dir = Some(dir);
    }

    pub(crate) fn clipboard(&mut self) -> Result<&mut arboard::Clipboard, DeliveryError> {
        let clipboard = match self.clipboard.take() {
            Some(clipboard) => clipboard,
            None => {
                arboard::Clipboard::new().map_err(|e| DeliveryError::Clipboard(e.to_string()))?
            }
        };
        Ok(self.clipboard.insert(clipboard))
    }

    pub(crate) fn agent(&mut self) -> &ureq::Agent {
        self.agent.get_or_insert_with(|| {
            ureq::Agent::config_builder()
                .timeout_global(Some(LISTENER_TIMEOUT))
                .http_status_as_error(false)
                .build()
                .into()
        })
    }
}
