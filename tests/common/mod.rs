//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use chrono::NaiveDate;
use nvim_wizard::generator::generate_with_date;
use nvim_wizard::Selection;

/// Fixed generation date so outputs compare byte for byte
pub fn fixed_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

/// Render with [`fixed_date`]
pub fn render(selection: &Selection) -> String {
    generate_with_date(selection, fixed_date())
}

/// Python + gruvbox + telescope, the smallest selection with a plugin section
pub fn python_selection() -> Selection {
    Selection::default()
        .with_languages(["python"])
        .with_theme("gruvbox")
        .with_plugins(["telescope"])
}

/// A selection touching every part of the generator
pub fn kitchen_sink_selection() -> Selection {
    Selection::default()
        .with_languages(["typescript", "rust", "go", "csharp", "lua"])
        .with_theme("tokyonight")
        .with_plugins([
            "treesitter",
            "telescope",
            "nvim-tree",
            "tabbufline",
            "lualine",
            "gitsigns",
            "which-key",
            "nvim-dap",
            "custom-stevearc/oil.nvim",
        ])
        .with_leader(",")
        .with_keymap("save_file", "<C-s>")
        .with_keymap("nvim_tree_toggle", "<leader>e")
}

/// Line index of the first line containing `needle`
pub fn line_of(text: &str, needle: &str) -> Option<usize> {
    text.lines().position(|line| line.contains(needle))
}
