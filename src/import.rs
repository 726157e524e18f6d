//! Recover a selection from an existing `init.lua`
//!
//! Recognition is pattern based and lossy: anything that does not match a
//! catalog entry is ignored. Keymaps are recovered only when their right-hand
//! side is a catalog command, and only when the chord differs from the
//! action's default.

use regex::Regex;
use serde_json::json;

use crate::catalog::{Action, Language, LegacyFlag, Plugin, Theme};
use crate::keymap::KeymapOverrides;
use crate::selection::Selection;

/// A Lua string literal, single or double quoted
const LUA_LITERAL: &str = r#"'(?:\\.|[^'\\])*'|"(?:\\.|[^"\\])*""#;

#[derive(Debug)]
pub enum ImportError {
    Empty,
    Pattern(regex::Error),
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Empty => write!(f, "Configuration is empty"),
            ImportError::Pattern(e) => write!(f, "Pattern error: {}", e),
        }
    }
}

impl std::error::Error for ImportError {}

impl From<regex::Error> for ImportError {
    fn from(e: regex::Error) -> Self {
        ImportError::Pattern(e)
    }
}

// ============================================================================
// Tables
// ============================================================================

/// LSP server ids and the languages they imply
const SERVERS: &[(&str, &[Language])] = &[
    ("ts_ls", &[Language::TypeScript, Language::JavaScript]),
    ("tsserver", &[Language::TypeScript, Language::JavaScript]),
    ("pyright", &[Language::Python]),
    ("pylsp", &[Language::Python]),
    ("rust_analyzer", &[Language::Rust]),
    ("gopls", &[Language::Go]),
    ("clangd", &[Language::C, Language::Cpp]),
    ("ccls", &[Language::C, Language::Cpp]),
    ("omnisharp", &[Language::CSharp]),
    ("csharp_ls", &[Language::CSharp]),
    ("jdtls", &[Language::Java]),
    ("lua_ls", &[Language::Lua]),
    ("sumneko_lua", &[Language::Lua]),
];

/// Repository patterns per catalog plugin
fn plugin_pattern(plugin: &Plugin) -> &'static str {
    match plugin {
        Plugin::Treesitter => r"nvim-treesitter/nvim-treesitter",
        Plugin::Telescope => r"telescope\.nvim",
        Plugin::NvimTree => r"nvim-tree\.lua",
        Plugin::Tabbufline => r"tabbufline|nvchad/ui",
        Plugin::Dashboard => r"dashboard-nvim|alpha-nvim",
        Plugin::IndentBlankline => r"indent-blankline",
        Plugin::Lualine => r"lualine\.nvim",
        Plugin::NvimSurround => r"nvim-surround",
        Plugin::Gitsigns => r"gitsigns\.nvim",
        Plugin::WhichKey => r"which-key\.nvim",
        Plugin::NvimDap => r"mfussenegger/nvim-dap",
        Plugin::NvimNotify => r"nvim-notify",
        Plugin::Custom(_) | Plugin::Unrecognized(_) => r"$^",
    }
}

fn flag_pattern(flag: LegacyFlag) -> &'static str {
    match flag {
        LegacyFlag::LineNumbers => r"vim\.(?:opt|wo|o)\.number\s*=\s*true",
        LegacyFlag::WrapText => r"vim\.(?:opt|wo|o)\.wrap\s*=\s*true",
        LegacyFlag::AutoSave => r"nvim_create_autocmd\(\s*\{[^}]*TextChanged[^}]*\}[^)]*silent! write",
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse a configuration text into a selection
pub fn parse_init_lua(text: &str) -> Result<Selection, ImportError> {
    if text.trim().is_empty() {
        return Err(ImportError::Empty);
    }

    let mut selection = Selection::default()
        .with_languages(languages(text)?)
        .with_plugins(plugins(text)?)
        .with_theme(&theme(text)?.map(|t| t.id().to_string()).unwrap_or_default());

    if let Some(leader) = leader(text)? {
        selection = selection.with_leader(&leader);
    }
    for flag in LegacyFlag::ALL {
        if Regex::new(flag_pattern(flag))?.is_match(text) {
            selection = selection.toggle_flag(flag);
        }
    }

    let (keymaps, terminal_position) = keymaps(text)?;
    selection = selection.with_keymaps(keymaps);
    if let Some(position) = terminal_position.filter(|p| *p != "horizontal") {
        selection = selection.with_setting("terminalPosition", json!(position));
    }

    tracing::debug!(
        "Imported {} languages, {} plugins, {} keymaps",
        selection.languages.len(),
        selection.plugins.len(),
        selection.keymaps.len()
    );
    Ok(selection)
}

fn leader(text: &str) -> Result<Option<String>, ImportError> {
    let re = Regex::new(&format!(r"vim\.g\.mapleader\s*=\s*({})", LUA_LITERAL))?;
    Ok(re.captures(text).map(|caps| lua_unquote(&caps[1])))
}

fn languages(text: &str) -> Result<Vec<String>, ImportError> {
    let mut found: Vec<Language> = Vec::new();
    for (server, langs) in SERVERS {
        if Regex::new(&format!(r"\b{}\b", server))?.is_match(text) {
            found.extend(langs.iter().cloned());
        }
    }
    Ok(Language::known()
        .into_iter()
        .filter(|lang| found.contains(lang))
        .map(|lang| lang.id().to_string())
        .collect())
}

fn plugins(text: &str) -> Result<Vec<String>, ImportError> {
    let mut ids = Vec::new();
    for plugin in Plugin::known() {
        if Regex::new(&format!("(?i){}", plugin_pattern(&plugin)))?.is_match(text) {
            ids.push(plugin.id());
        }
    }
    Ok(ids)
}

/// The colorscheme the config applies, else the first theme plugin it installs
fn theme(text: &str) -> Result<Option<Theme>, ImportError> {
    let applied = Regex::new(r#"colorscheme(?:\s*\(?\s*['"]|[ \t]+)([\w.-]+)"#)?;
    if let Some(caps) = applied.captures(text) {
        let name = &caps[1];
        let known = Theme::known()
            .into_iter()
            .find(|theme| name.starts_with(theme.id()));
        return Ok(known.or_else(|| Theme::parse(name)));
    }

    let lower = text.to_lowercase();
    Ok(Theme::known()
        .into_iter()
        .filter(|theme| !theme.is_default())
        .find(|theme| lower.contains(theme.id())))
}

/// Keymap overrides, plus the terminal position implied by the terminal binding
fn keymaps(
    text: &str,
) -> Result<(KeymapOverrides, Option<&'static str>), ImportError> {
    let re = Regex::new(&format!(
        r"vim\.keymap\.set\(\s*({lit})\s*,\s*({lit})\s*,\s*(function\s*\(\s*\).*?\bend\b|{lit})\s*[,)]",
        lit = LUA_LITERAL
    ))?;

    let mut overrides = KeymapOverrides::new();
    let mut terminal_position = None;

    for caps in re.captures_iter(text) {
        let mode = lua_unquote(&caps[1]);
        let chord = lua_unquote(&caps[2]);
        let raw_rhs = &caps[3];
        let rhs = if raw_rhs.starts_with('\'') || raw_rhs.starts_with('"') {
            lua_unquote(raw_rhs)
        } else {
            collapse_whitespace(raw_rhs)
        };

        if let Some(position) = terminal_toggle_position(&mode, &rhs) {
            terminal_position = Some(position);
            record(&mut overrides, &[Action::TerminalToggle], &chord);
            continue;
        }

        let candidates: Vec<Action> = Action::ALL
            .iter()
            .copied()
            .filter(|action| action.mode().code() == mode)
            .filter(|action| {
                action
                    .command()
                    .is_some_and(|command| collapse_whitespace(command) == rhs)
            })
            .collect();
        record(&mut overrides, &candidates, &chord);
    }
    Ok((overrides, terminal_position))
}

/// Assign `chord` to the first candidate still unassigned
///
/// A chord equal to any candidate's default is left implicit.
fn record(overrides: &mut KeymapOverrides, candidates: &[Action], chord: &str) {
    if candidates.iter().any(|action| action.default_chord() == chord) {
        return;
    }
    if let Some(action) = candidates
        .iter()
        .find(|action| !overrides.contains_key(action.id()))
    {
        overrides.insert(action.id().to_string(), chord.to_string());
    }
}

fn terminal_toggle_position(mode: &str, rhs: &str) -> Option<&'static str> {
    if mode != "n" {
        return None;
    }
    if rhs.starts_with("function()") && rhs.contains("vim.cmd.terminal()") && rhs.contains("nvim_open_win") {
        return Some("floating");
    }
    if rhs.contains("| terminal") || rhs.contains("|terminal") {
        return Some(if rhs.contains("vsplit") { "vertical" } else { "horizontal" });
    }
    None
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Contents of a quoted Lua string literal
fn lua_unquote(literal: &str) -> String {
    let inner = literal
        .get(1..literal.len().saturating_sub(1))
        .unwrap_or_default();
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate_with_date;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn test_empty_text_is_an_error() {
        assert!(matches!(parse_init_lua("  \n"), Err(ImportError::Empty)));
    }

    #[test]
    fn test_lua_unquote() {
        assert_eq!(lua_unquote("' '"), " ");
        assert_eq!(lua_unquote(r#""a\"b""#), "a\"b");
        assert_eq!(lua_unquote(r"'\\'"), "\\");
        assert_eq!(lua_unquote(r"'it\'s'"), "it's");
    }

    #[test]
    fn test_leader_variants() {
        let s = parse_init_lua("vim.g.mapleader = ','\n").unwrap();
        assert_eq!(s.leader_key, ",");
        let s = parse_init_lua("vim.g.mapleader = \"\\\\\"\n").unwrap();
        assert_eq!(s.leader_key, "\\");
        let s = parse_init_lua("vim.g.mapleader = ''\n").unwrap();
        assert_eq!(s.leader_key, " ");
    }

    #[test]
    fn test_languages_from_server_ids() {
        let text = "lspconfig.pyright.setup({})\nlspconfig.clangd.setup({})\n";
        let s = parse_init_lua(text).unwrap();
        assert_eq!(s.languages, vec!["python", "c", "cpp"]);
    }

    #[test]
    fn test_server_ids_need_word_boundaries() {
        let s = parse_init_lua("local my_gopls_wrapper = 1\n").unwrap();
        assert!(s.languages.is_empty());
    }

    #[test]
    fn test_theme_variants() {
        let s = parse_init_lua("vim.cmd('colorscheme tokyonight-night')").unwrap();
        assert_eq!(s.theme, "tokyonight");
        let s = parse_init_lua("vim.cmd.colorscheme('rose-pine')").unwrap();
        assert_eq!(s.theme, "rose-pine");
        let s = parse_init_lua("{ \"ellisonleao/gruvbox.nvim\" }").unwrap();
        assert_eq!(s.theme, "gruvbox");
        let s = parse_init_lua("vim.opt.number = true").unwrap();
        assert_eq!(s.theme, "");
    }

    #[test]
    fn test_flags() {
        let s = parse_init_lua("vim.wo.number = true\nvim.opt.wrap = true\n").unwrap();
        assert!(s.has_flag(LegacyFlag::LineNumbers));
        assert!(s.has_flag(LegacyFlag::WrapText));
        assert!(!s.has_flag(LegacyFlag::AutoSave));
    }

    #[test]
    fn test_legacy_auto_save_is_not_the_debounced_setting() {
        let legacy = generate_with_date(
            &Selection::default().toggle_flag(LegacyFlag::AutoSave),
            date(),
        );
        assert!(parse_init_lua(&legacy).unwrap().has_flag(LegacyFlag::AutoSave));

        let debounced = generate_with_date(
            &Selection::default().with_setting("autoSave", json!(true)),
            date(),
        );
        assert!(!parse_init_lua(&debounced).unwrap().has_flag(LegacyFlag::AutoSave));
    }

    #[test]
    fn test_generated_config_round_trip() {
        let original = Selection::default()
            .with_languages(["rust", "lua"])
            .with_theme("catppuccin")
            .with_plugins(["telescope", "gitsigns", "which-key"])
            .with_leader(",")
            .with_keymap("save_file", "<C-s>")
            .with_keymap("telescope_find_files", "<leader>p");
        let text = generate_with_date(&original, date());

        let imported = parse_init_lua(&text).unwrap();
        assert_eq!(imported.languages, vec!["rust", "lua"]);
        assert_eq!(imported.theme, "catppuccin");
        assert_eq!(imported.plugins, vec!["telescope", "gitsigns", "which-key"]);
        assert_eq!(imported.leader_key, ",");
        assert_eq!(imported.keymaps.get("save_file").map(String::as_str), Some("<C-s>"));
        assert_eq!(imported.keymaps.get("telescope_find_files").map(String::as_str), Some("<leader>p"));
        assert!(!imported.keymaps.contains_key("quit"));
    }

    #[test]
    fn test_terminal_position_is_recovered() {
        let original = Selection::default()
            .with_setting("terminalPosition", json!("vertical"))
            .with_keymap("terminal_toggle", "<leader>tt");
        let text = generate_with_date(&original, date());

        let imported = parse_init_lua(&text).unwrap();
        assert_eq!(
            imported.settings.get_effective("terminalPosition"),
            Some(json!("vertical"))
        );
        assert_eq!(
            imported.keymaps.get("terminal_toggle").map(String::as_str),
            Some("<leader>tt")
        );
    }

    #[test]
    fn test_unknown_bindings_are_ignored() {
        let s = parse_init_lua("vim.keymap.set('n', '<leader>z', ':Zen<CR>', { desc = 'Zen' })").unwrap();
        assert!(s.keymaps.is_empty());
    }
}
