//! Setting definitions grouped by category
//!
//! Ids are dotted paths into the settings tree (`telescope.previewEnabled`).
//! Top-level editor options have single-segment ids.

use serde_json::Value;

/// Value kind of a setting, with its kind-specific constraints
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingKind {
    Boolean,
    Number { min: i64, max: i64, step: i64 },
    Select(&'static [SelectOption]),
    /// Free text; list-valued settings are edited as comma-separated text
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

/// Catalog default of a setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Bool(bool),
    Number(i64),
    Str(&'static str),
    List(&'static [&'static str]),
}

impl DefaultValue {
    pub fn to_value(self) -> Value {
        match self {
            DefaultValue::Bool(b) => Value::Bool(b),
            DefaultValue::Number(n) => Value::from(n),
            DefaultValue::Str(s) => Value::String(s.to_string()),
            DefaultValue::List(items) => {
                Value::Array(items.iter().map(|s| Value::String(s.to_string())).collect())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettingDef {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub kind: SettingKind,
    pub default: DefaultValue,
    pub unit: Option<&'static str>,
    /// Visible only if at least one of these plugins is selected
    pub requires_plugins: &'static [&'static str],
    /// Visible only if this sibling setting is truthy
    pub depends_on: Option<&'static str>,
}

impl SettingDef {
    const fn new(
        id: &'static str,
        title: &'static str,
        description: &'static str,
        kind: SettingKind,
        default: DefaultValue,
    ) -> Self {
        Self {
            id,
            title,
            description,
            kind,
            default,
            unit: None,
            requires_plugins: &[],
            depends_on: None,
        }
    }

    const fn unit(mut self, unit: &'static str) -> Self {
        self.unit = Some(unit);
        self
    }

    const fn requires(mut self, plugins: &'static [&'static str]) -> Self {
        self.requires_plugins = plugins;
        self
    }

    const fn depends_on(mut self, id: &'static str) -> Self {
        self.depends_on = Some(id);
        self
    }

    /// `(min, max)` for number settings
    pub fn range(&self) -> Option<(i64, i64)> {
        match self.kind {
            SettingKind::Number { min, max, .. } => Some((min, max)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SettingCategory {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub settings: &'static [SettingDef],
}

const fn boolean(id: &'static str, title: &'static str, desc: &'static str, v: bool) -> SettingDef {
    SettingDef::new(id, title, desc, SettingKind::Boolean, DefaultValue::Bool(v))
}

const fn number(
    id: &'static str,
    title: &'static str,
    desc: &'static str,
    v: i64,
    range: (i64, i64, i64),
) -> SettingDef {
    SettingDef::new(
        id,
        title,
        desc,
        SettingKind::Number {
            min: range.0,
            max: range.1,
            step: range.2,
        },
        DefaultValue::Number(v),
    )
}

const fn select(
    id: &'static str,
    title: &'static str,
    desc: &'static str,
    v: &'static str,
    options: &'static [SelectOption],
) -> SettingDef {
    SettingDef::new(id, title, desc, SettingKind::Select(options), DefaultValue::Str(v))
}

const fn opt(value: &'static str, label: &'static str, description: &'static str) -> SelectOption {
    SelectOption {
        value,
        label,
        description,
    }
}

const TELESCOPE: &[&str] = &["telescope"];
const NVIM_TREE: &[&str] = &["nvim-tree"];
const LUALINE: &[&str] = &["lualine"];
const TREESITTER: &[&str] = &["treesitter"];
const NVIM_DAP: &[&str] = &["nvim-dap"];
const GITSIGNS: &[&str] = &["gitsigns"];

// ============================================================================
// Core editor categories
// ============================================================================

const EDITOR: &[SettingDef] = &[
    number("indentSize", "Indent Size", "Number of spaces for indentation", 2, (1, 8, 1))
        .unit("spaces"),
    select(
        "lineNumbers",
        "Line Numbers",
        "How to display line numbers",
        "both",
        &[
            opt("none", "Hidden", "No line numbers"),
            opt("absolute", "Absolute", "Show absolute line numbers"),
            opt("relative", "Relative", "Show relative line numbers"),
            opt("both", "Both", "Show both absolute and relative"),
        ],
    ),
    boolean("lineWrapping", "Line Wrapping", "Wrap long lines for better readability", false),
    boolean("showWhitespace", "Show Whitespace", "Display whitespace characters", false),
    boolean(
        "cursorLine",
        "Highlight Cursor Line",
        "Highlight the line where cursor is located",
        true,
    ),
    number(
        "colorColumn",
        "Color Column",
        "Show vertical line at specified column (0 to disable)",
        0,
        (0, 200, 1),
    )
    .unit("characters"),
    number(
        "scrollOffset",
        "Scroll Offset",
        "Keep cursor this many lines from screen edges",
        8,
        (0, 20, 1),
    )
    .unit("lines"),
];

const BEHAVIOR: &[SettingDef] = &[
    boolean("autoSave", "Auto Save", "Automatically save files when modified", false),
    number(
        "autoSaveDelay",
        "Auto Save Delay",
        "Delay before auto-saving changes",
        1000,
        (100, 5000, 100),
    )
    .unit("ms")
    .depends_on("autoSave"),
    number("undoLevels", "Undo Levels", "Maximum number of undo operations", 1000, (50, 10000, 50)),
    boolean(
        "smartCase",
        "Smart Case Search",
        "Case-insensitive unless uppercase letters are used",
        true,
    ),
    boolean("ignoreCase", "Ignore Case", "Ignore case in search patterns", true),
    select(
        "splitDirection",
        "Split Direction",
        "Default direction for new splits",
        "below",
        &[
            opt("right", "Right", "Open vertical splits to the right"),
            opt("below", "Below", "Open horizontal splits below"),
        ],
    ),
];

const INTERFACE: &[SettingDef] = &[
    boolean(
        "showSignColumn",
        "Show Sign Column",
        "Always show column for git signs, diagnostics, etc.",
        true,
    ),
    boolean(
        "showFoldColumn",
        "Show Fold Column",
        "Display column for code folding indicators",
        false,
    ),
    select(
        "terminalPosition",
        "Terminal Position",
        "How to open integrated terminal",
        "horizontal",
        &[
            opt("horizontal", "Bottom", "Horizontal split at bottom"),
            opt("vertical", "Right", "Vertical split on right"),
            opt("floating", "Floating", "Floating terminal window"),
        ],
    ),
    select(
        "completion",
        "Completion Style",
        "Autocompletion behavior and appearance",
        "advanced",
        &[
            opt("basic", "Basic", "Simple completion menu"),
            opt("advanced", "Advanced", "Rich completion with previews"),
        ],
    ),
];

const PERFORMANCE: &[SettingDef] = &[
    number(
        "updateTime",
        "Update Time",
        "Time to wait before triggering CursorHold event",
        250,
        (50, 2000, 50),
    )
    .unit("ms"),
    number(
        "timeoutLength",
        "Timeout Length",
        "Time to wait for key sequence completion",
        300,
        (100, 1000, 50),
    )
    .unit("ms"),
    boolean(
        "lazyRedraw",
        "Lazy Redraw",
        "Don't redraw during macro execution for better performance",
        false,
    ),
];

// ============================================================================
// Plugin categories
// ============================================================================

const TELESCOPE_SETTINGS: &[SettingDef] = &[
    boolean(
        "telescope.previewEnabled",
        "Enable Preview",
        "Show file preview in telescope results",
        true,
    )
    .requires(TELESCOPE),
    number(
        "telescope.historyLimit",
        "History Limit",
        "Number of recent searches to remember",
        100,
        (10, 1000, 10),
    )
    .requires(TELESCOPE),
    SettingDef::new(
        "telescope.ignoredPatterns",
        "Ignored Patterns",
        "File patterns to ignore in search (comma-separated)",
        SettingKind::Text,
        DefaultValue::List(&["*.git*", "node_modules/*", "*.lock"]),
    )
    .requires(TELESCOPE),
];

const NVIM_TREE_SETTINGS: &[SettingDef] = &[
    number(
        "nvimTree.width",
        "Explorer Width",
        "Width of the file explorer sidebar",
        30,
        (20, 80, 5),
    )
    .unit("columns")
    .requires(NVIM_TREE),
    boolean("nvimTree.autoClose", "Auto Close", "Close tree when opening a file", false)
        .requires(NVIM_TREE),
    boolean(
        "nvimTree.followCurrentFile",
        "Follow Current File",
        "Automatically focus the current file in tree",
        true,
    )
    .requires(NVIM_TREE),
    boolean(
        "nvimTree.gitIntegration",
        "Git Integration",
        "Show git status in file explorer",
        true,
    )
    .requires(NVIM_TREE),
];

const STATUSLINE_SETTINGS: &[SettingDef] = &[
    select(
        "lualine.theme",
        "Statusline Theme",
        "Visual theme for the status line",
        "auto",
        &[
            opt("auto", "Auto", "Match editor theme"),
            opt("gruvbox", "Gruvbox", "Gruvbox theme colors"),
            opt("nord", "Nord", "Nord theme colors"),
            opt("catppuccin", "Catppuccin", "Catppuccin theme colors"),
            opt("tokyonight", "TokyoNight", "TokyoNight theme colors"),
        ],
    )
    .requires(LUALINE),
    boolean(
        "lualine.showFileEncoding",
        "Show File Encoding",
        "Display file encoding in status line",
        false,
    )
    .requires(LUALINE),
    boolean("lualine.showFileType", "Show File Type", "Display file type in status line", true)
        .requires(LUALINE),
    boolean(
        "lualine.showBranch",
        "Show Git Branch",
        "Display current git branch in status line",
        true,
    )
    .requires(LUALINE),
];

const TREESITTER_SETTINGS: &[SettingDef] = &[
    boolean(
        "treesitter.autoInstall",
        "Auto Install Parsers",
        "Automatically install language parsers",
        true,
    )
    .requires(TREESITTER),
    boolean(
        "treesitter.highlightEnabled",
        "Syntax Highlighting",
        "Enable TreeSitter syntax highlighting",
        true,
    )
    .requires(TREESITTER),
    boolean(
        "treesitter.indentEnabled",
        "Smart Indentation",
        "Enable TreeSitter-based indentation",
        true,
    )
    .requires(TREESITTER),
    boolean(
        "treesitter.foldingEnabled",
        "Code Folding",
        "Enable TreeSitter-based code folding",
        false,
    )
    .requires(TREESITTER),
];

const DEBUGGING_SETTINGS: &[SettingDef] = &[
    boolean(
        "debugging.autoOpenUI",
        "Auto Open Debug UI",
        "Automatically open debug UI when debugging starts",
        true,
    )
    .requires(NVIM_DAP),
    boolean(
        "debugging.showInlineVariables",
        "Inline Variables",
        "Show variable values inline while debugging",
        true,
    )
    .requires(NVIM_DAP),
    boolean(
        "debugging.breakOnException",
        "Break on Exception",
        "Automatically break when exceptions occur",
        false,
    )
    .requires(NVIM_DAP),
];

const GIT_SETTINGS: &[SettingDef] = &[
    boolean(
        "git.showLineBlame",
        "Show Line Blame",
        "Display git blame information for current line",
        false,
    )
    .requires(GITSIGNS),
    boolean(
        "git.showDiffInSigns",
        "Show Diff in Signs",
        "Display git changes in sign column",
        true,
    )
    .requires(GITSIGNS),
    boolean(
        "git.wordDiff",
        "Word-level Diff",
        "Show word-level differences in git hunks",
        false,
    )
    .requires(GITSIGNS),
];

/// All setting categories in display order
pub const CATEGORIES: &[SettingCategory] = &[
    SettingCategory {
        id: "editor",
        title: "Editor",
        description: "Core editing experience and appearance",
        settings: EDITOR,
    },
    SettingCategory {
        id: "behavior",
        title: "Behavior",
        description: "Editor behavior and workflow preferences",
        settings: BEHAVIOR,
    },
    SettingCategory {
        id: "ui",
        title: "Interface",
        description: "User interface and visual elements",
        settings: INTERFACE,
    },
    SettingCategory {
        id: "performance",
        title: "Performance",
        description: "Optimize editor performance and responsiveness",
        settings: PERFORMANCE,
    },
    SettingCategory {
        id: "telescope",
        title: "Telescope",
        description: "Fuzzy finder settings",
        settings: TELESCOPE_SETTINGS,
    },
    SettingCategory {
        id: "nvimtree",
        title: "File Explorer",
        description: "NvimTree file explorer settings",
        settings: NVIM_TREE_SETTINGS,
    },
    SettingCategory {
        id: "statusline",
        title: "Status Line",
        description: "Lualine statusline configuration",
        settings: STATUSLINE_SETTINGS,
    },
    SettingCategory {
        id: "treesitter",
        title: "Syntax Highlighting",
        description: "TreeSitter syntax parsing settings",
        settings: TREESITTER_SETTINGS,
    },
    SettingCategory {
        id: "debugging",
        title: "Debugging",
        description: "Debug adapter protocol settings",
        settings: DEBUGGING_SETTINGS,
    },
    SettingCategory {
        id: "git",
        title: "Git Integration",
        description: "Git workflow and display settings",
        settings: GIT_SETTINGS,
    },
];

/// Every setting definition, in category order
pub fn all_settings() -> impl Iterator<Item = &'static SettingDef> {
    CATEGORIES.iter().flat_map(|category| category.settings.iter())
}

pub fn find_setting(id: &str) -> Option<&'static SettingDef> {
    all_settings().find(|def| def.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_setting_ids_unique() {
        let mut seen = HashSet::new();
        for def in all_settings() {
            assert!(seen.insert(def.id), "duplicate setting {}", def.id);
        }
    }

    #[test]
    fn test_number_defaults_within_range() {
        for def in all_settings() {
            if let (Some((min, max)), DefaultValue::Number(n)) = (def.range(), def.default) {
                assert!(n >= min && n <= max, "{} default out of range", def.id);
            }
        }
    }

    #[test]
    fn test_select_defaults_are_options() {
        for def in all_settings() {
            if let (SettingKind::Select(options), DefaultValue::Str(v)) = (def.kind, def.default) {
                assert!(options.iter().any(|o| o.value == v), "{}", def.id);
            }
        }
    }

    #[test]
    fn test_depends_on_targets_exist() {
        for def in all_settings() {
            if let Some(dep) = def.depends_on {
                assert!(find_setting(dep).is_some(), "{} depends on missing {}", def.id, dep);
            }
        }
    }

    #[test]
    fn test_nested_settings_are_plugin_gated() {
        for def in all_settings() {
            assert_eq!(def.id.contains('.'), !def.requires_plugins.is_empty(), "{}", def.id);
        }
    }

    #[test]
    fn test_find_unknown_setting() {
        assert!(find_setting("nope").is_none());
        assert!(find_setting("telescope.previewEnabled").is_some());
    }
}
