//! Dotted-path resolution, visibility and change tracking

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::catalog::{all_settings, find_setting, SettingDef};

/// Settings object of a selection
///
/// May be sparse (only overrides) or full. Missing leaves and `null` leaves
/// both resolve to the catalog default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings(Map<String, Value>);

impl Default for Settings {
    /// The full default tree a fresh session starts with
    fn default() -> Self {
        let mut settings = Settings(Map::new());
        for def in all_settings() {
            settings.set_in_place(def.id, def.default.to_value());
        }
        settings
    }
}

impl Settings {
    /// A tree with no explicit values at all
    pub fn empty() -> Self {
        Settings(Map::new())
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Settings(map)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// The explicit value at `id`, ignoring catalog defaults
    pub fn get_explicit(&self, id: &str) -> Option<&Value> {
        let mut segments = id.split('.');
        let first = segments.next()?;
        let mut node = self.0.get(first)?;
        for segment in segments {
            node = node.as_object()?.get(segment)?;
        }
        if node.is_null() {
            None
        } else {
            Some(node)
        }
    }

    /// Effective value: the explicit override, else the catalog default
    ///
    /// Returns `None` for ids with no catalog definition and no explicit value.
    pub fn get_effective(&self, id: &str) -> Option<Value> {
        self.get_explicit(id)
            .cloned()
            .or_else(|| find_setting(id).map(|def| def.default.to_value()))
    }

    /// Returns a new tree with exactly the leaf at `id` replaced
    pub fn set_effective(&self, id: &str, value: Value) -> Settings {
        let mut next = self.clone();
        next.set_in_place(id, value);
        next
    }

    fn set_in_place(&mut self, id: &str, value: Value) {
        let segments: Vec<&str> = id.split('.').collect();
        let Some((leaf, parents)) = segments.split_last() else {
            return;
        };

        let mut node = &mut self.0;
        for segment in parents {
            let entry = node
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            node = match entry {
                Value::Object(map) => map,
                _ => return,
            };
        }
        node.insert(leaf.to_string(), value);
    }

    /// Whether the setting is shown for the given plugin set
    pub fn is_visible<S: AsRef<str>>(&self, def: &SettingDef, active_plugins: &[S]) -> bool {
        if !def.requires_plugins.is_empty()
            && !def
                .requires_plugins
                .iter()
                .any(|required| active_plugins.iter().any(|p| p.as_ref() == *required))
        {
            return false;
        }
        match def.depends_on {
            Some(dep) => self.get_effective(dep).map(|v| is_truthy(&v)).unwrap_or(false),
            None => true,
        }
    }

    /// Whether the effective value differs from the catalog default
    ///
    /// List-valued settings compare as sorted sequences, and a comma-separated
    /// string counts as the list it spells.
    pub fn is_changed(&self, id: &str) -> bool {
        let Some(def) = find_setting(id) else {
            return false;
        };
        let Some(value) = self.get_effective(id) else {
            return false;
        };
        !values_equal(&value, &def.default.to_value())
    }

    /// Reset one setting to its catalog default
    pub fn reset_one(&self, id: &str) -> Settings {
        match find_setting(id) {
            Some(def) => self.set_effective(id, def.default.to_value()),
            None => self.clone(),
        }
    }

    /// Reset everything; identical to a fresh session's tree
    pub fn reset_all(&self) -> Settings {
        Settings::default()
    }

    /// Ids of every catalog setting whose effective value differs from its default
    pub fn changed_settings(&self) -> Vec<&'static str> {
        all_settings()
            .filter(|def| self.is_changed(def.id))
            .map(|def| def.id)
            .collect()
    }
}

/// Every catalog setting visible for the given tree and plugin set
pub fn visible_settings<S: AsRef<str>>(
    settings: &Settings,
    active_plugins: &[S],
) -> Vec<&'static SettingDef> {
    all_settings()
        .filter(|def| settings.is_visible(def, active_plugins))
        .collect()
}

/// Loose truthiness used for `depends_on`
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn as_sorted_list(value: &Value) -> Option<Vec<String>> {
    let mut items: Vec<String> = match value {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.trim().to_string(),
                other => other.to_string(),
            })
            .collect(),
        Value::String(s) if s.contains(',') => {
            s.split(',').map(|part| part.trim().to_string()).collect()
        }
        _ => return None,
    };
    items.retain(|item| !item.is_empty());
    items.sort();
    Some(items)
}

fn values_equal(a: &Value, b: &Value) -> bool {
    if let (Some(a), Some(b)) = (as_sorted_list(a), as_sorted_list(b)) {
        return a == b;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}
