//! Keymap resolution tests: chord capture, effective bindings, conflicts
//! and default reconciliation as a selection evolves

mod common;

use nvim_wizard::catalog::{Action, Mode};
use nvim_wizard::keymap::{
    active_actions, compute_conflicts, conflict_key, effective_chord, is_changed, reset_one,
    ChordRecorder, KeyPress, KeymapOverrides,
};
use nvim_wizard::Selection;

fn presses(descs: &[&str]) -> Vec<KeyPress> {
    descs
        .iter()
        .map(|d| KeyPress::parse(d).expect("valid key description"))
        .collect()
}

// ============================================================================
// Capture into the selection
// ============================================================================

#[test]
fn test_recorded_leader_chord_becomes_effective() {
    let selection = Selection::default();
    let chord = ChordRecorder::record(&selection.leader_key, presses(&["space", "s"]))
        .expect("leader chord completes on second key");
    assert_eq!(chord, "<leader>s");

    let selection = selection.with_keymap(Action::SaveFile.id(), &chord);
    assert_eq!(effective_chord(Action::SaveFile, &selection.keymaps), "<leader>s");
    assert!(is_changed(Action::SaveFile, &selection.keymaps));
}

#[test]
fn test_recorded_modifier_chord_completes_immediately() {
    let chord = ChordRecorder::record(" ", presses(&["ctrl+s", "x"]));
    assert_eq!(chord.as_deref(), Some("<C-s>"));
}

#[test]
fn test_custom_leader_is_recognized() {
    let chord = ChordRecorder::record(",", presses(&[",", "w"]));
    assert_eq!(chord.as_deref(), Some("<leader>w"));

    // With a space leader, a comma is an ordinary key
    let chord = ChordRecorder::record(" ", presses(&[",", "w"]));
    assert_eq!(chord.as_deref(), Some(","));
}

#[test]
fn test_shifted_letter_keeps_modifier() {
    let chord = ChordRecorder::record(" ", presses(&["shift+G"]));
    assert_eq!(chord.as_deref(), Some("<S-G>"));

    let chord = ChordRecorder::record(" ", presses(&["space", "shift+G"]));
    assert_eq!(chord.as_deref(), Some("<leader><S-G>"));
}

#[test]
fn test_modified_space_leader_starts_sequence() {
    let chord = ChordRecorder::record(" ", presses(&["ctrl+space", "w"]));
    assert_eq!(chord.as_deref(), Some("<leader>w"));
}

#[test]
fn test_leader_alone_never_completes() {
    assert_eq!(ChordRecorder::record(" ", presses(&["space"])), None);
}

// ============================================================================
// Conflicts
// ============================================================================

#[test]
fn test_rebinding_onto_a_default_creates_conflict() {
    let selection = Selection::default().with_keymap("quit", "<leader>w");
    let active = active_actions(&selection.plugins);
    let conflicts = compute_conflicts(&active, &selection.keymaps);

    assert!(conflicts.has_conflict(Action::Quit));
    assert!(conflicts.has_conflict(Action::SaveFile));
    assert_eq!(conflicts.conflicting_with(Action::Quit), vec![Action::SaveFile]);
    assert!(conflicts
        .groups()
        .contains_key(&conflict_key("<leader>w", Mode::Normal)));
}

#[test]
fn test_resolving_conflict_clears_it() {
    let keymaps: KeymapOverrides = [("quit".to_string(), "<leader>w".to_string())]
        .into_iter()
        .collect();
    let none: [&str; 0] = [];
    let active = active_actions(&none);
    assert_eq!(compute_conflicts(&active, &keymaps).len(), 1);

    let keymaps = reset_one(Action::Quit, &keymaps);
    assert!(compute_conflicts(&active, &keymaps).is_empty());
    assert!(!is_changed(Action::Quit, &keymaps));
}

#[test]
fn test_same_chord_in_different_modes_is_not_a_conflict() {
    // terminal_escape lives in terminal mode; a normal-mode binding may reuse its chord
    let selection = Selection::default().with_keymap("save_file", "<C-\\><C-n>");
    let active = active_actions(&selection.plugins);
    let conflicts = compute_conflicts(&active, &selection.keymaps);
    assert!(!conflicts.has_conflict(Action::SaveFile));
    assert!(!conflicts.has_conflict(Action::TerminalEscape));
}

#[test]
fn test_inactive_plugin_actions_do_not_conflict() {
    // <leader>ff belongs to telescope, which is not selected
    let selection = Selection::default().with_keymap("save_file", "<leader>ff");
    let active = active_actions(&selection.plugins);
    assert!(compute_conflicts(&active, &selection.keymaps).is_empty());

    let selection = selection.toggle_plugin("telescope");
    let active = active_actions(&selection.plugins);
    let conflicts = compute_conflicts(&active, &selection.keymaps);
    assert!(conflicts.has_conflict(Action::SaveFile));
    assert!(conflicts.has_conflict(Action::TelescopeFindFiles));
}

#[test]
fn test_kitchen_sink_has_no_conflicts() {
    let selection = common::kitchen_sink_selection();
    let active = active_actions(&selection.plugins);
    let conflicts = compute_conflicts(&active, &selection.keymaps);
    assert!(conflicts.is_empty(), "unexpected conflicts: {:?}", conflicts.groups());
}

// ============================================================================
// Default reconciliation
// ============================================================================

#[test]
fn test_enabling_plugin_assigns_defaults_without_clobbering() {
    let selection = Selection::default()
        .with_keymap("telescope_live_grep", "<leader>/")
        .toggle_plugin("telescope");

    assert_eq!(
        selection.keymaps.get("telescope_find_files").map(String::as_str),
        Some("<leader>ff")
    );
    assert_eq!(
        selection.keymaps.get("telescope_live_grep").map(String::as_str),
        Some("<leader>/")
    );
}

#[test]
fn test_disabling_plugin_keeps_overrides_but_deactivates_actions() {
    let selection = Selection::default()
        .toggle_plugin("gitsigns")
        .toggle_plugin("gitsigns");

    assert!(!selection.plugins.iter().any(|p| p == "gitsigns"));
    assert!(selection.keymaps.contains_key("gitsigns_next_hunk"));
    assert!(!active_actions(&selection.plugins).contains(&Action::GitsignsNextHunk));
}

#[test]
fn test_toggling_plugin_back_on_is_stable() {
    let once = Selection::default().toggle_plugin("nvim-dap");
    let again = once.toggle_plugin("nvim-dap").toggle_plugin("nvim-dap");
    assert_eq!(once.keymaps, again.keymaps);
}
