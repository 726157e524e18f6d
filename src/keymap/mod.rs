//! Keymap resolution and chord capture
//!
//! This module provides:
//! - Chord capture from raw key presses (`<C-S-x>`, `<leader>w`)
//! - Effective binding resolution (explicit override → catalog default)
//! - Same-mode conflict detection across the active action set
//! - Batched default reconciliation
//! - User overrides via YAML files
//!
//! # Architecture
//!
//! ```text
//! KeyPress → ChordRecorder → chord string → Selection.keymaps
//!                                              │
//!        Action catalog defaults ──────────────┴→ effective_chord → generator
//! ```

mod chord;
mod config;
mod defaults;
mod resolver;
mod types;

pub use chord::{display_tokens, format_press, parse_chord, Capture, ChordRecorder, LEADER};
pub use config::{keymap_to_yaml, load_keymap_file, parse_keymap_yaml, validate_chord, KeymapError};
pub use defaults::{
    default_keymap_yaml, default_overrides, get_default_keymap_yaml, load_user_overrides,
    merge_overrides,
};
pub use resolver::{
    active_actions, compute_conflicts, conflict_key, effective_chord, effective_chord_for,
    is_changed, reconcile_defaults, reset_one, Conflicts, KeymapOverrides, KeymapPatch,
};
pub use types::{KeyCode, KeyPress, Modifiers};

#[cfg(test)]
mod tests;
