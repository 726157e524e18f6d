//! Static option catalogs
//!
//! Every selectable option the wizard knows about lives here as an explicit
//! enum with total mapping functions:
//!
//! - [`Language`] - language ids and their LSP / formatter / parser tooling
//! - [`Theme`] - colorschemes and their plugin specs
//! - [`Plugin`] - optional plugins in catalog order, plus `custom-<slug>` ids
//! - [`Action`] - keymap actions with mode, default chord and command template
//! - [`settings`] - setting definitions grouped by category
//!
//! Ids coming from outside (selection files, share links) are parsed with
//! `parse`, which never fails: anything unknown becomes an `Unrecognized`
//! variant that the generator treats as inert.

mod action;
mod language;
mod plugin;
pub mod search;
pub mod settings;
mod theme;

pub use action::{is_lua_function, Action, Mode, Section};
pub use language::{Language, TargetOs};
pub use plugin::{LegacyFlag, Plugin};
pub use settings::{
    all_settings, find_setting, DefaultValue, SelectOption, SettingCategory, SettingDef,
    SettingKind, CATEGORIES,
};
pub use theme::Theme;
