//! YAML override files for keymaps
//!
//! ```yaml
//! bindings:
//!   - action: save_file
//!     key: "<C-s>"
//! ```

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::chord::parse_chord;
use super::resolver::KeymapOverrides;
use crate::catalog::Action;

/// Root structure of a keymap YAML file
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct KeymapConfig {
    #[serde(default)]
    pub bindings: Vec<BindingConfig>,
}

/// A single binding entry from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindingConfig {
    pub action: String,
    pub key: String,
}

/// Load overrides from a YAML file
pub fn load_keymap_file(path: &Path) -> Result<KeymapOverrides, KeymapError> {
    let content = std::fs::read_to_string(path).map_err(|e| KeymapError::IoError(e.to_string()))?;

    parse_keymap_yaml(&content)
}

/// Parse overrides from a YAML string
///
/// Entries naming unknown actions are skipped with a warning; an entry with an
/// empty or malformed key fails the whole file.
pub fn parse_keymap_yaml(yaml: &str) -> Result<KeymapOverrides, KeymapError> {
    let config: KeymapConfig =
        serde_yaml::from_str(yaml).map_err(|e| KeymapError::ParseError(e.to_string()))?;

    let mut overrides = KeymapOverrides::new();
    for entry in config.bindings {
        let Ok(action) = Action::from_str(&entry.action) else {
            tracing::warn!("Skipping keymap entry for unknown action: {}", entry.action);
            continue;
        };
        validate_chord(&entry.key)?;
        overrides.insert(action.id().to_string(), entry.key);
    }

    Ok(overrides)
}

/// Render overrides back to YAML, in action catalog order
pub fn keymap_to_yaml(overrides: &KeymapOverrides) -> Result<String, KeymapError> {
    let bindings = Action::ALL
        .iter()
        .filter_map(|action| {
            overrides.get(action.id()).map(|key| BindingConfig {
                action: action.id().to_string(),
                key: key.clone(),
            })
        })
        .collect();
    serde_yaml::to_string(&KeymapConfig { bindings })
        .map_err(|e| KeymapError::ParseError(e.to_string()))
}

/// Reject chords that could never be typed
pub fn validate_chord(chord: &str) -> Result<(), KeymapError> {
    if chord.trim().is_empty() {
        return Err(KeymapError::InvalidKey("empty key".to_string()));
    }
    if chord.chars().any(|c| c == '\n' || c == '\r') {
        return Err(KeymapError::InvalidKey(format!("line break in key: {:?}", chord)));
    }
    if parse_chord(chord).iter().any(|token| token == "<>") {
        return Err(KeymapError::InvalidKey(format!("empty key group in: {}", chord)));
    }
    Ok(())
}

/// Error type for keymap loading
#[derive(Debug, Clone)]
pub enum KeymapError {
    IoError(String),
    ParseError(String),
    InvalidKey(String),
}

impl std::fmt::Display for KeymapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeymapError::IoError(e) => write!(f, "IO error: {}", e),
            KeymapError::ParseError(e) => write!(f, "Parse error: {}", e),
            KeymapError::InvalidKey(k) => write!(f, "Invalid key: {}", k),
        }
    }
}

impl std::error::Error for KeymapError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
bindings:
  - action: save_file
    key: "<C-s>"
  - action: telescope_find_files
    key: "<leader>p"
"#;

        let overrides = parse_keymap_yaml(yaml).unwrap();
        assert_eq!(overrides.len(), 2);
        assert_eq!(overrides["save_file"], "<C-s>");
        assert_eq!(overrides["telescope_find_files"], "<leader>p");
    }

    #[test]
    fn test_unknown_action_skipped() {
        let yaml = r#"
bindings:
  - action: launch_rockets
    key: "<leader>r"
  - action: quit
    key: "<leader>Q"
"#;

        let overrides = parse_keymap_yaml(yaml).unwrap();
        assert_eq!(overrides.len(), 1);
        assert!(overrides.contains_key("quit"));
    }

    #[test]
    fn test_empty_key_rejected() {
        let yaml = "bindings:\n  - action: quit\n    key: \"\"\n";
        assert!(matches!(
            parse_keymap_yaml(yaml),
            Err(KeymapError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_malformed_yaml() {
        assert!(matches!(
            parse_keymap_yaml("bindings: [unclosed"),
            Err(KeymapError::ParseError(_))
        ));
    }

    #[test]
    fn test_empty_file_is_no_overrides() {
        assert!(parse_keymap_yaml("{}").unwrap().is_empty());
    }

    #[test]
    fn test_yaml_output_reparses() {
        let mut overrides = KeymapOverrides::new();
        overrides.insert("quit".to_string(), "<leader>Q".to_string());
        overrides.insert("bogus".to_string(), "x".to_string());
        let yaml = keymap_to_yaml(&overrides).unwrap();
        let parsed = parse_keymap_yaml(&yaml).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed["quit"], "<leader>Q");
    }
}
