//! Configuration generator: renders a [`Selection`] into an `init.lua`
//!
//! Rendering is a pure function of the selection and the date stamped into
//! the header. Sections always appear in this order:
//!
//! 1. header comment
//! 2. leader key
//! 3. baseline options
//! 4. settings blocks, then legacy flag blocks
//! 5. plugin manager section (only with recognized languages or plugins)
//! 6. colorscheme
//! 7. window navigation
//! 8. custom keymaps
//!
//! Unknown ids anywhere in the selection contribute nothing.

mod keymaps;
mod lsp;
mod lua;
mod options;
mod plugins;

use chrono::NaiveDate;

pub use lua::{lua_string, LuaWriter};
pub use options::GENERATED_ON_PREFIX;
pub use plugins::PLUGIN_SETUP_OPEN;

use crate::catalog::{Language, Plugin, Theme};
use crate::selection::Selection;
use crate::settings::EffectiveSettings;

/// Selection with ids parsed into catalog variants
pub(crate) struct Render<'a> {
    selection: &'a Selection,
    languages: Vec<Language>,
    theme: Option<Theme>,
    /// Catalog and custom plugins; unrecognized ids are already dropped
    plugins: Vec<Plugin>,
    settings: EffectiveSettings,
}

impl<'a> Render<'a> {
    fn new(selection: &'a Selection) -> Self {
        Render {
            selection,
            languages: selection.languages.iter().map(|id| Language::parse(id)).collect(),
            theme: Theme::parse(&selection.theme),
            plugins: selection.recognized_plugins(),
            settings: selection.settings.effective(),
        }
    }
}

/// Render the selection, stamping today's date into the header
pub fn generate(selection: &Selection) -> String {
    generate_with_date(selection, chrono::Local::now().date_naive())
}

/// Render the selection with a fixed header date
pub fn generate_with_date(selection: &Selection, date: NaiveDate) -> String {
    let render = Render::new(selection);
    let mut w = LuaWriter::new();

    options::header(&mut w, &render, date);
    options::leader(&mut w, &selection.leader_key);
    options::baseline(&mut w);
    options::settings(&mut w, &render);
    options::legacy_flags(&mut w, &render);

    if plugins::needs_plugin_manager(&render) {
        plugins::plugin_section(&mut w, &render);
    }

    options::colorscheme(&mut w, &render);
    options::window_navigation(&mut w);
    keymaps::custom_keymaps(&mut w, &render);

    let text = w.finish();
    tracing::debug!(
        "Generated configuration: {} lines for {} languages, {} plugins",
        text.lines().count(),
        render.languages.len(),
        render.plugins.len()
    );
    text
}

/// The text with the generation date line removed
///
/// Two renders of the same selection on different days compare equal after
/// this.
pub fn without_date(text: &str) -> String {
    text.lines()
        .filter(|line| !line.starts_with(GENERATED_ON_PREFIX))
        .map(|line| format!("{}\n", line))
        .collect()
}
