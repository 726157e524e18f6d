//! The wizard selection: everything the generator renders from
//!
//! Updates never mutate in place; each `with_*` method returns a new
//! selection, so a half-applied update cannot be observed.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::{LegacyFlag, Plugin};
use crate::keymap::{active_actions, reconcile_defaults, KeymapOverrides};
use crate::settings::Settings;

/// Leader key of a fresh selection
pub const DEFAULT_LEADER: &str = " ";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    /// Language ids, unique, in selection order
    #[serde(default)]
    pub languages: Vec<String>,
    /// Theme id; empty means no theme override
    #[serde(default)]
    pub theme: String,
    /// Plugin ids (catalog or `custom-<slug>`), unique
    #[serde(default)]
    pub plugins: Vec<String>,
    /// Legacy on/off flags (`line_numbers`, `auto_save`, `wrap_text`)
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default = "default_leader")]
    pub leader_key: String,
    /// Explicit keymap overrides by action id
    #[serde(default)]
    pub keymaps: KeymapOverrides,
}

fn default_leader() -> String {
    DEFAULT_LEADER.to_string()
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            languages: Vec::new(),
            theme: String::new(),
            plugins: Vec::new(),
            flags: Vec::new(),
            settings: Settings::default(),
            leader_key: default_leader(),
            keymaps: KeymapOverrides::new(),
        }
    }
}

/// Order-preserving dedup; blank ids are dropped
pub(crate) fn unique_ids<I, S>(ids: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for id in ids {
        let id = id.as_ref().trim();
        if !id.is_empty() && !out.iter().any(|existing| existing == id) {
            out.push(id.to_string());
        }
    }
    out
}

fn toggled(list: &[String], id: &str) -> Vec<String> {
    if list.iter().any(|existing| existing == id) {
        list.iter().filter(|existing| *existing != id).cloned().collect()
    } else {
        unique_ids(list.iter().map(String::as_str).chain(std::iter::once(id)))
    }
}

impl Selection {
    pub fn with_languages<I, S>(&self, languages: I) -> Selection
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Selection {
            languages: unique_ids(languages),
            ..self.clone()
        }
    }

    pub fn toggle_language(&self, id: &str) -> Selection {
        Selection {
            languages: toggled(&self.languages, id),
            ..self.clone()
        }
    }

    pub fn with_theme(&self, theme: &str) -> Selection {
        Selection {
            theme: theme.trim().to_string(),
            ..self.clone()
        }
    }

    pub fn with_plugins<I, S>(&self, plugins: I) -> Selection
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Selection {
            plugins: unique_ids(plugins),
            ..self.clone()
        }
    }

    /// Add or remove a plugin
    ///
    /// Adding a plugin also assigns catalog defaults to its actions in one
    /// batch; existing overrides are kept.
    pub fn toggle_plugin(&self, id: &str) -> Selection {
        let plugins = toggled(&self.plugins, id);
        let patch = reconcile_defaults(&active_actions(plugins.as_slice()), &self.keymaps);
        Selection {
            keymaps: patch.apply(&self.keymaps),
            plugins,
            ..self.clone()
        }
    }

    pub fn toggle_flag(&self, flag: LegacyFlag) -> Selection {
        Selection {
            flags: toggled(&self.flags, flag.id()),
            ..self.clone()
        }
    }

    pub fn has_flag(&self, flag: LegacyFlag) -> bool {
        self.flags.iter().any(|f| f == flag.id())
    }

    pub fn with_setting(&self, id: &str, value: Value) -> Selection {
        Selection {
            settings: self.settings.set_effective(id, value),
            ..self.clone()
        }
    }

    pub fn reset_setting(&self, id: &str) -> Selection {
        Selection {
            settings: self.settings.reset_one(id),
            ..self.clone()
        }
    }

    pub fn reset_all_settings(&self) -> Selection {
        Selection {
            settings: self.settings.reset_all(),
            ..self.clone()
        }
    }

    pub fn with_leader(&self, leader: &str) -> Selection {
        let leader = if leader.is_empty() { DEFAULT_LEADER } else { leader };
        Selection {
            leader_key: leader.to_string(),
            ..self.clone()
        }
    }

    pub fn with_keymap(&self, action_id: &str, chord: &str) -> Selection {
        let mut keymaps = self.keymaps.clone();
        keymaps.insert(action_id.to_string(), chord.to_string());
        Selection {
            keymaps,
            ..self.clone()
        }
    }

    pub fn with_keymaps(&self, keymaps: KeymapOverrides) -> Selection {
        Selection {
            keymaps,
            ..self.clone()
        }
    }

    /// Selected plugins that exist in the catalog or are valid custom ids
    pub fn recognized_plugins(&self) -> Vec<Plugin> {
        self.plugins
            .iter()
            .map(|id| Plugin::parse(id))
            .filter(|plugin| !matches!(plugin, Plugin::Unrecognized(_)))
            .collect()
    }

    /// Load a selection from a YAML file
    pub fn load(path: &Path) -> Result<Selection, SelectionError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SelectionError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Selection, SelectionError> {
        let selection: Selection =
            serde_yaml::from_str(yaml).map_err(|e| SelectionError::Parse(e.to_string()))?;
        Ok(selection.normalized())
    }

    pub fn to_yaml(&self) -> Result<String, SelectionError> {
        serde_yaml::to_string(self).map_err(|e| SelectionError::Serialize(e.to_string()))
    }

    /// Write the selection as YAML, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), SelectionError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| SelectionError::Io(format!("{}: {}", parent.display(), e)))?;
        }
        let content = self.to_yaml()?;
        std::fs::write(path, content)
            .map_err(|e| SelectionError::Io(format!("{}: {}", path.display(), e)))?;
        tracing::info!("Saved selection to {}", path.display());
        Ok(())
    }

    /// Enforce list uniqueness and a non-empty leader after deserializing
    pub fn normalized(self) -> Selection {
        Selection {
            languages: unique_ids(&self.languages),
            plugins: unique_ids(&self.plugins),
            flags: unique_ids(&self.flags),
            leader_key: if self.leader_key.is_empty() {
                default_leader()
            } else {
                self.leader_key
            },
            theme: self.theme.trim().to_string(),
            ..self
        }
    }
}

/// Error type for selection files
#[derive(Debug, Clone)]
pub enum SelectionError {
    Io(String),
    Parse(String),
    Serialize(String),
}

impl std::fmt::Display for SelectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionError::Io(e) => write!(f, "IO error: {}", e),
            SelectionError::Parse(e) => write!(f, "Parse error: {}", e),
            SelectionError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for SelectionError {}
