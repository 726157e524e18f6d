//! nvim-wizard - Neovim configuration generator
//!
//! This crate provides the catalogs, resolvers and generator that turn a
//! structured selection into an `init.lua`, plus the delivery adapters that
//! hand the generated text to the editor.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod config_paths;
pub mod delivery;
pub mod fs_watcher;
pub mod generator;
pub mod health;
pub mod import;
pub mod keymap;
pub mod presets;
pub mod selection;
pub mod settings;
pub mod share;
pub mod tracing;

// Re-export commonly used types
pub use config::WizardConfig;
pub use generator::generate;
pub use selection::Selection;
pub use settings::Settings;
