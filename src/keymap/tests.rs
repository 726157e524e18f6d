//! Integration tests for the keymap system

use super::*;
use crate::catalog::Action;

#[test]
fn test_embedded_yaml_parses() {
    let overrides = parse_keymap_yaml(get_default_keymap_yaml())
        .expect("Embedded keymap.yaml should parse successfully");
    assert!(overrides.is_empty(), "Starter keymap should not rebind anything");
}

#[test]
fn test_default_yaml_covers_catalog() {
    let parsed = parse_keymap_yaml(&default_keymap_yaml()).unwrap();
    assert_eq!(parsed.len(), Action::ALL.len());
    assert_eq!(parsed, default_overrides());
}

#[test]
fn test_merge_overrides_later_wins() {
    let base = parse_keymap_yaml("bindings:\n  - action: quit\n    key: \"<leader>q\"\n").unwrap();
    let user = parse_keymap_yaml("bindings:\n  - action: quit\n    key: \"ZZ\"\n").unwrap();
    let merged = merge_overrides(base, user);
    assert_eq!(merged["quit"], "ZZ");
}

#[test]
fn test_recorded_chord_feeds_resolver() {
    let chord = ChordRecorder::record(
        " ",
        [KeyPress::key(KeyCode::Space), KeyPress::char('W')],
    )
    .unwrap();

    let mut keymaps = KeymapOverrides::new();
    keymaps.insert(Action::SaveFile.id().to_string(), chord);
    assert_eq!(effective_chord(Action::SaveFile, &keymaps), "<leader>W");
    assert!(is_changed(Action::SaveFile, &keymaps));
}

#[test]
fn test_recorded_chord_can_conflict() {
    let chord = ChordRecorder::record(" ", [KeyPress::key(KeyCode::Space), KeyPress::char('q')])
        .unwrap();
    let mut keymaps = KeymapOverrides::new();
    keymaps.insert(Action::SaveFile.id().to_string(), chord);

    let none: [&str; 0] = [];
    let conflicts = compute_conflicts(&active_actions(&none), &keymaps);
    assert!(conflicts.has_conflict(Action::SaveFile));
    assert!(conflicts.has_conflict(Action::Quit));
}

#[test]
fn test_reconcile_after_plugin_activation() {
    let none: [&str; 0] = [];
    let keymaps = reconcile_defaults(&active_actions(&none), &KeymapOverrides::new())
        .apply(&KeymapOverrides::new());

    let patch = reconcile_defaults(&active_actions(&["nvim-dap"]), &keymaps);
    let ids: Vec<&str> = patch.entries().iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "dap_toggle_breakpoint",
            "dap_continue",
            "dap_step_over",
            "dap_step_into",
            "dap_step_out"
        ]
    );
}

#[test]
fn test_display_tokens_of_defaults() {
    assert_eq!(
        display_tokens(Action::TerminalEscape.default_chord()),
        vec!["C-\\", "C-n"]
    );
    assert_eq!(
        display_tokens(Action::TelescopeFindFiles.default_chord()),
        vec!["Leader", "f", "f"]
    );
}
