//! Effective bindings, conflict detection and default reconciliation
//!
//! Keymap overrides are a map from action id to chord. Ids that do not name a
//! catalog action are kept but never resolved.

use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::{Action, Mode, Plugin};

/// Action id → chord overrides, as stored in a selection
pub type KeymapOverrides = BTreeMap<String, String>;

/// Effective chord: the explicit override if non-empty, else the catalog default
pub fn effective_chord(action: Action, keymaps: &KeymapOverrides) -> String {
    match keymaps.get(action.id()) {
        Some(chord) if !chord.trim().is_empty() => chord.clone(),
        _ => action.default_chord().to_string(),
    }
}

/// Effective chord for a raw id; unknown ids are unbound
pub fn effective_chord_for(id: &str, keymaps: &KeymapOverrides) -> String {
    match id.parse::<Action>() {
        Ok(action) => effective_chord(action, keymaps),
        Err(()) => String::new(),
    }
}

/// General actions plus the actions of every active catalog plugin, in catalog order
pub fn active_actions<S: AsRef<str>>(plugins: &[S]) -> Vec<Action> {
    let active: Vec<Plugin> = plugins.iter().map(|p| Plugin::parse(p.as_ref())).collect();
    Action::ALL
        .iter()
        .copied()
        .filter(|action| match action.required_plugin() {
            Some(plugin) => active.contains(&plugin),
            None => true,
        })
        .collect()
}

/// Whether the action's effective chord differs from its catalog default
pub fn is_changed(action: Action, keymaps: &KeymapOverrides) -> bool {
    effective_chord(action, keymaps) != action.default_chord()
}

/// New overrides with `action` set back to its catalog default
pub fn reset_one(action: Action, keymaps: &KeymapOverrides) -> KeymapOverrides {
    let mut next = keymaps.clone();
    next.insert(action.id().to_string(), action.default_chord().to_string());
    next
}

/// Key used to group colliding bindings: `"<chord>:<mode>"`
pub fn conflict_key(chord: &str, mode: Mode) -> String {
    format!("{}:{}", chord, mode.code())
}

/// Colliding bindings, keyed by `"<chord>:<mode>"`
///
/// Only keys shared by two or more actions are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conflicts {
    groups: BTreeMap<String, BTreeSet<Action>>,
    by_action: BTreeMap<Action, String>,
}

impl Conflicts {
    pub fn has_conflict(&self, action: Action) -> bool {
        self.by_action
            .get(&action)
            .and_then(|key| self.groups.get(key))
            .map(|group| group.len() > 1)
            .unwrap_or(false)
    }

    /// Other actions sharing this action's chord and mode
    pub fn conflicting_with(&self, action: Action) -> Vec<Action> {
        self.by_action
            .get(&action)
            .and_then(|key| self.groups.get(key))
            .map(|group| group.iter().copied().filter(|a| *a != action).collect())
            .unwrap_or_default()
    }

    pub fn groups(&self) -> &BTreeMap<String, BTreeSet<Action>> {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }
}

/// Detect same-mode chord collisions among the active actions
pub fn compute_conflicts(active: &[Action], keymaps: &KeymapOverrides) -> Conflicts {
    let mut all: BTreeMap<String, BTreeSet<Action>> = BTreeMap::new();
    let mut by_action = BTreeMap::new();

    for &action in active {
        let chord = effective_chord(action, keymaps);
        if chord.is_empty() {
            continue;
        }
        let key = conflict_key(&chord, action.mode());
        all.entry(key.clone()).or_default().insert(action);
        by_action.insert(action, key);
    }

    let groups: BTreeMap<_, _> = all.into_iter().filter(|(_, group)| group.len() > 1).collect();
    by_action.retain(|_, key| groups.contains_key(key));

    if !groups.is_empty() {
        tracing::debug!(conflicts = groups.len(), "keymap conflicts detected");
    }

    Conflicts { groups, by_action }
}

/// A batch of default assignments produced by [`reconcile_defaults`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeymapPatch {
    entries: Vec<(String, String)>,
}

impl KeymapPatch {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Apply the whole patch as one transition
    pub fn apply(&self, keymaps: &KeymapOverrides) -> KeymapOverrides {
        let mut next = keymaps.clone();
        for (id, chord) in &self.entries {
            next.insert(id.clone(), chord.clone());
        }
        next
    }
}

/// Defaults for every active action that has no explicit override yet
pub fn reconcile_defaults(active: &[Action], keymaps: &KeymapOverrides) -> KeymapPatch {
    let entries = active
        .iter()
        .filter(|action| {
            keymaps
                .get(action.id())
                .map(|chord| chord.trim().is_empty())
                .unwrap_or(true)
        })
        .map(|action| (action.id().to_string(), action.default_chord().to_string()))
        .collect();
    KeymapPatch { entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overrides(pairs: &[(&str, &str)]) -> KeymapOverrides {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_effective_chord_precedence() {
        let keymaps = overrides(&[("save_file", "<C-s>"), ("quit", "  ")]);
        assert_eq!(effective_chord(Action::SaveFile, &keymaps), "<C-s>");
        assert_eq!(effective_chord(Action::Quit, &keymaps), "<leader>q");
        assert_eq!(effective_chord_for("nonexistent_action", &keymaps), "");
    }

    #[test]
    fn test_active_actions_gated_by_plugins() {
        let none: [&str; 0] = [];
        let general = active_actions(&none);
        assert!(general.contains(&Action::SaveFile));
        assert!(!general.contains(&Action::TelescopeFindFiles));

        let with_telescope = active_actions(&["telescope"]);
        assert!(with_telescope.contains(&Action::TelescopeFindFiles));
        assert!(!with_telescope.contains(&Action::DapContinue));
    }

    #[test]
    fn test_no_conflicts_in_defaults() {
        let plugins: Vec<String> = Plugin::known().iter().map(|p| p.id()).collect();
        let active = active_actions(plugins.as_slice());
        let conflicts = compute_conflicts(&active, &KeymapOverrides::new());
        assert!(conflicts.is_empty(), "{:?}", conflicts.groups());
    }

    #[test]
    fn test_conflict_symmetry() {
        let keymaps = overrides(&[("quit", "<leader>w")]);
        let active = active_actions::<&str>(&[]);
        let conflicts = compute_conflicts(&active, &keymaps);
        assert!(conflicts.has_conflict(Action::SaveFile));
        assert!(conflicts.has_conflict(Action::Quit));
        assert!(!conflicts.has_conflict(Action::SelectAll));
        assert_eq!(conflicts.conflicting_with(Action::Quit), vec![Action::SaveFile]);
        assert!(conflicts.groups().contains_key("<leader>w:n"));
    }

    #[test]
    fn test_same_chord_different_mode_is_fine() {
        let keymaps = overrides(&[("terminal_nav_left", "<leader>w")]);
        let active = active_actions::<&str>(&[]);
        assert!(compute_conflicts(&active, &keymaps).is_empty());
    }

    #[test]
    fn test_reconcile_single_patch() {
        let keymaps = overrides(&[("save_file", "<C-s>")]);
        let active = active_actions(&["which-key"]);
        let patch = reconcile_defaults(&active, &keymaps);
        assert_eq!(patch.len(), active.len() - 1);

        let next = patch.apply(&keymaps);
        assert_eq!(next.get("save_file").map(String::as_str), Some("<C-s>"));
        assert_eq!(next.get("which_key_show").map(String::as_str), Some("<leader>?"));
        assert!(reconcile_defaults(&active, &next).is_empty());
    }

    #[test]
    fn test_reset_and_changed() {
        let keymaps = overrides(&[("save_file", "<C-s>")]);
        assert!(is_changed(Action::SaveFile, &keymaps));
        let reset = reset_one(Action::SaveFile, &keymaps);
        assert!(!is_changed(Action::SaveFile, &reset));
    }
}
