//! Typed view of a settings tree
//!
//! Values of the wrong type fall back to the catalog default; numbers are
//! clamped to the definition's range.

use serde_json::Value;

use super::resolver::Settings;
use crate::catalog::{find_setting, DefaultValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineNumbers {
    None,
    Absolute,
    Relative,
    Both,
}

impl LineNumbers {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(LineNumbers::None),
            "absolute" => Some(LineNumbers::Absolute),
            "relative" => Some(LineNumbers::Relative),
            "both" => Some(LineNumbers::Both),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitDirection {
    Right,
    Below,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveSettings {
    pub indent_size: i64,
    pub line_numbers: LineNumbers,
    pub line_wrapping: bool,
    pub show_whitespace: bool,
    pub cursor_line: bool,
    pub color_column: i64,
    pub scroll_offset: i64,

    pub auto_save: bool,
    pub auto_save_delay: i64,
    pub undo_levels: i64,
    pub smart_case: bool,
    pub ignore_case: bool,
    pub split_direction: SplitDirection,

    pub show_sign_column: bool,
    pub show_fold_column: bool,
    pub terminal_position: String,
    pub advanced_completion: bool,

    pub update_time: i64,
    pub timeout_length: i64,
    pub lazy_redraw: bool,

    pub telescope: TelescopeSettings,
    pub nvim_tree: NvimTreeSettings,
    pub lualine: LualineSettings,
    pub treesitter: TreesitterSettings,
    pub debugging: DebuggingSettings,
    pub git: GitSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TelescopeSettings {
    pub preview_enabled: bool,
    pub history_limit: i64,
    pub ignored_patterns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NvimTreeSettings {
    pub width: i64,
    pub auto_close: bool,
    pub follow_current_file: bool,
    pub git_integration: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LualineSettings {
    pub theme: String,
    pub show_file_encoding: bool,
    pub show_file_type: bool,
    pub show_branch: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreesitterSettings {
    pub auto_install: bool,
    pub highlight_enabled: bool,
    pub indent_enabled: bool,
    pub folding_enabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DebuggingSettings {
    pub auto_open_ui: bool,
    pub show_inline_variables: bool,
    pub break_on_exception: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GitSettings {
    pub show_line_blame: bool,
    pub show_diff_in_signs: bool,
    pub word_diff: bool,
}

struct Reader<'a> {
    settings: &'a Settings,
}

impl Reader<'_> {
    fn default_of(id: &str) -> Option<DefaultValue> {
        find_setting(id).map(|def| def.default)
    }

    fn bool(&self, id: &str) -> bool {
        match self.settings.get_explicit(id) {
            Some(Value::Bool(b)) => *b,
            _ => matches!(Self::default_of(id), Some(DefaultValue::Bool(true))),
        }
    }

    fn number(&self, id: &str) -> i64 {
        let fallback = match Self::default_of(id) {
            Some(DefaultValue::Number(n)) => n,
            _ => 0,
        };
        let value = match self.settings.get_explicit(id) {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f.round() as i64))
                .unwrap_or(fallback),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(fallback),
            _ => fallback,
        };
        match find_setting(id).and_then(|def| def.range()) {
            Some((min, max)) => value.clamp(min, max),
            None => value,
        }
    }

    fn string(&self, id: &str) -> String {
        match self.settings.get_explicit(id) {
            Some(Value::String(s)) => s.clone(),
            _ => match Self::default_of(id) {
                Some(DefaultValue::Str(s)) => s.to_string(),
                _ => String::new(),
            },
        }
    }

    fn list(&self, id: &str) -> Vec<String> {
        let items: Vec<String> = match self.settings.get_explicit(id) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            Some(Value::String(s)) => s.split(',').map(str::to_string).collect(),
            _ => match Self::default_of(id) {
                Some(DefaultValue::List(items)) => items.iter().map(|s| s.to_string()).collect(),
                _ => Vec::new(),
            },
        };
        items
            .into_iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect()
    }
}

impl EffectiveSettings {
    pub fn resolve(settings: &Settings) -> Self {
        let r = Reader { settings };
        let line_numbers =
            LineNumbers::parse(&r.string("lineNumbers")).unwrap_or(LineNumbers::Both);
        let split_direction = match r.string("splitDirection").as_str() {
            "right" => SplitDirection::Right,
            _ => SplitDirection::Below,
        };

        EffectiveSettings {
            indent_size: r.number("indentSize"),
            line_numbers,
            line_wrapping: r.bool("lineWrapping"),
            show_whitespace: r.bool("showWhitespace"),
            cursor_line: r.bool("cursorLine"),
            color_column: r.number("colorColumn"),
            scroll_offset: r.number("scrollOffset"),

            auto_save: r.bool("autoSave"),
            auto_save_delay: r.number("autoSaveDelay"),
            undo_levels: r.number("undoLevels"),
            smart_case: r.bool("smartCase"),
            ignore_case: r.bool("ignoreCase"),
            split_direction,

            show_sign_column: r.bool("showSignColumn"),
            show_fold_column: r.bool("showFoldColumn"),
            terminal_position: r.string("terminalPosition"),
            advanced_completion: r.string("completion") != "basic",

            update_time: r.number("updateTime"),
            timeout_length: r.number("timeoutLength"),
            lazy_redraw: r.bool("lazyRedraw"),

            telescope: TelescopeSettings {
                preview_enabled: r.bool("telescope.previewEnabled"),
                history_limit: r.number("telescope.historyLimit"),
                ignored_patterns: r.list("telescope.ignoredPatterns"),
            },
            nvim_tree: NvimTreeSettings {
                width: r.number("nvimTree.width"),
                auto_close: r.bool("nvimTree.autoClose"),
                follow_current_file: r.bool("nvimTree.followCurrentFile"),
                git_integration: r.bool("nvimTree.gitIntegration"),
            },
            lualine: LualineSettings {
                theme: r.string("lualine.theme"),
                show_file_encoding: r.bool("lualine.showFileEncoding"),
                show_file_type: r.bool("lualine.showFileType"),
                show_branch: r.bool("lualine.showBranch"),
            },
            treesitter: TreesitterSettings {
                auto_install: r.bool("treesitter.autoInstall"),
                highlight_enabled: r.bool("treesitter.highlightEnabled"),
                indent_enabled: r.bool("treesitter.indentEnabled"),
                folding_enabled: r.bool("treesitter.foldingEnabled"),
            },
            debugging: DebuggingSettings {
                auto_open_ui: r.bool("debugging.autoOpenUI"),
                show_inline_variables: r.bool("debugging.showInlineVariables"),
                break_on_exception: r.bool("debugging.breakOnException"),
            },
            git: GitSettings {
                show_line_blame: r.bool("git.showLineBlame"),
                show_diff_in_signs: r.bool("git.showDiffInSigns"),
                word_diff: r.bool("git.wordDiff"),
            },
        }
    }
}

impl Settings {
    /// Typed view used by the generator
    pub fn effective(&self) -> EffectiveSettings {
        EffectiveSettings::resolve(self)
    }
}
