//! Preset stacks embedded from `presets.yaml`

use serde::Deserialize;

use crate::selection::Selection;

const PRESETS_YAML: &str = include_str!("../presets.yaml");

/// A named starting point for a selection
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Preset {
    pub id: String,
    pub title: String,
    pub description: String,
    pub selection: Selection,
}

#[derive(Deserialize)]
struct PresetFile {
    #[serde(default)]
    presets: Vec<Preset>,
}

/// Parse a presets document
pub fn parse_presets(yaml: &str) -> Result<Vec<Preset>, serde_yaml::Error> {
    let file: PresetFile = serde_yaml::from_str(yaml)?;
    Ok(file
        .presets
        .into_iter()
        .map(|preset| Preset {
            selection: preset.selection.normalized(),
            ..preset
        })
        .collect())
}

/// All built-in presets, in display order
pub fn presets() -> Vec<Preset> {
    match parse_presets(PRESETS_YAML) {
        Ok(presets) => presets,
        Err(e) => {
            tracing::error!("Embedded presets.yaml failed to parse: {}", e);
            Vec::new()
        }
    }
}

pub fn find_preset(id: &str) -> Option<Preset> {
    presets().into_iter().find(|preset| preset.id == id)
}
