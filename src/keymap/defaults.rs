//! Layered keymap overrides
//!
//! Catalog defaults live on [`Action`]; this module loads the override files
//! that sit on top of them.

use std::path::Path;

use super::config::{keymap_to_yaml, load_keymap_file, parse_keymap_yaml};
use super::resolver::KeymapOverrides;
use crate::catalog::Action;

/// Starter override file embedded at compile time
const DEFAULT_KEYMAP_YAML: &str = include_str!("../../keymap.yaml");

/// The embedded starter `keymap.yaml`
pub fn get_default_keymap_yaml() -> &'static str {
    DEFAULT_KEYMAP_YAML
}

/// Every catalog default as an override map
pub fn default_overrides() -> KeymapOverrides {
    Action::ALL
        .iter()
        .map(|action| (action.id().to_string(), action.default_chord().to_string()))
        .collect()
}

/// Every catalog default rendered as a `keymap.yaml`
pub fn default_keymap_yaml() -> String {
    keymap_to_yaml(&default_overrides()).unwrap_or_else(|e| {
        tracing::warn!("Failed to render default keymap: {}", e);
        DEFAULT_KEYMAP_YAML.to_string()
    })
}

/// Load and merge override files
///
/// Loading order (each layer overrides the previous):
/// 1. Embedded starter keymap (compiled into binary)
/// 2. keymap.yaml in current directory (project-local overrides)
/// 3. User config at ~/.config/nvim-wizard/keymap.yaml
pub fn load_user_overrides() -> KeymapOverrides {
    let mut overrides = match parse_keymap_yaml(DEFAULT_KEYMAP_YAML) {
        Ok(o) => {
            tracing::debug!("Loaded embedded keymap ({} overrides)", o.len());
            o
        }
        Err(e) => {
            tracing::warn!("Failed to parse embedded keymap: {}", e);
            KeymapOverrides::new()
        }
    };

    let local = Path::new("keymap.yaml");
    if local.exists() {
        match load_keymap_file(local) {
            Ok(local_overrides) => {
                tracing::info!(
                    "Merging project keymap.yaml ({} overrides)",
                    local_overrides.len()
                );
                overrides = merge_overrides(overrides, local_overrides);
            }
            Err(e) => tracing::warn!("Failed to load project keymap.yaml: {}", e),
        }
    }

    if let Some(user_path) = crate::config_paths::keymap_file() {
        if user_path.exists() {
            match load_keymap_file(&user_path) {
                Ok(user_overrides) => {
                    tracing::info!(
                        "Merging user keymap from {} ({} overrides)",
                        user_path.display(),
                        user_overrides.len()
                    );
                    overrides = merge_overrides(overrides, user_overrides);
                }
                Err(e) => {
                    tracing::warn!("Failed to load user keymap from {}: {}", user_path.display(), e);
                }
            }
        }
    }

    overrides
}

/// Merge `user` on top of `base`; later layers win per action
pub fn merge_overrides(base: KeymapOverrides, user: KeymapOverrides) -> KeymapOverrides {
    let mut result = base;
    result.extend(user);
    result
}
