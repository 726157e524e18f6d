//! Keymap action catalog
//!
//! Each action carries its editor mode, default chord, the plugin that must be
//! active for it to matter, and the command template the generator emits.

use std::fmt;
use std::str::FromStr;

use super::plugin::Plugin;

/// Editor input mode a binding applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Mode {
    Normal,
    Insert,
    Visual,
    Command,
    Terminal,
    VisualBlock,
}

impl Mode {
    /// Single-letter mode code used by `vim.keymap.set`
    pub fn code(self) -> &'static str {
        match self {
            Mode::Normal => "n",
            Mode::Insert => "i",
            Mode::Visual => "v",
            Mode::Command => "c",
            Mode::Terminal => "t",
            Mode::VisualBlock => "x",
        }
    }

}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Grouping used when listing actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    General,
    Navigation,
    Display,
    Terminal,
    Plugin,
}

impl Section {
    pub fn title(self) -> &'static str {
        match self {
            Section::General => "General Actions",
            Section::Navigation => "Navigation & Buffers",
            Section::Display => "Display Options",
            Section::Terminal => "Terminal Mode",
            Section::Plugin => "Plugin Actions",
        }
    }
}

struct ActionInfo {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    section: Section,
    mode: Mode,
    default_chord: &'static str,
    command: Option<&'static str>,
    binding_desc: &'static str,
}

macro_rules! actions {
    ($(
        $variant:ident => {
            $id:literal, $name:literal, $desc:literal,
            $section:ident, $mode:ident, $chord:literal,
            $command:expr, $binding:literal
        }
    ),* $(,)?) => {
        /// A bindable action
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Action {
            $($variant),*
        }

        impl Action {
            /// Every action in catalog order
            pub const ALL: &'static [Action] = &[$(Action::$variant),*];

            fn info(self) -> &'static ActionInfo {
                match self {
                    $(Action::$variant => &ActionInfo {
                        id: $id,
                        name: $name,
                        description: $desc,
                        section: Section::$section,
                        mode: Mode::$mode,
                        default_chord: $chord,
                        command: $command,
                        binding_desc: $binding,
                    }),*
                }
            }
        }

        impl FromStr for Action {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($id => Ok(Action::$variant),)*
                    _ => Err(()),
                }
            }
        }
    };
}

actions! {
    // General
    CommandMode => { "command_mode", "Command Mode", "Enter command mode (map ; to :)",
        General, Normal, ";", Some(":"), "Enter command mode" },
    SaveFile => { "save_file", "Save File", "Save current file",
        General, Normal, "<leader>w", Some("<cmd>write<CR>"), "Save file" },
    Quit => { "quit", "Quit", "Quit Neovim",
        General, Normal, "<leader>q", Some("<cmd>quit<CR>"), "Quit" },
    SelectAll => { "select_all", "Select All", "Select all text",
        General, Normal, "<leader>a", Some("ggVG"), "Select all" },
    SearchReplace => { "search_replace", "Search & Replace", "Search and replace",
        General, Normal, "<leader>sr", Some(":%s/"), "Search and replace" },
    OpenConfigWeb => { "open_config_web", "Open Config Web App",
        "Open this configuration app in browser with current settings",
        General, Normal, "<C-,>", None, "Open config web app" },

    // Navigation
    SplitHorizontal => { "split_horizontal", "Split Horizontal", "Split window horizontally",
        Navigation, Normal, "<leader>s", Some("<cmd>split<CR>"), "Split window horizontally" },
    SplitVertical => { "split_vertical", "Split Vertical", "Split window vertically",
        Navigation, Normal, "<leader>v", Some("<cmd>vsplit<CR>"), "Split window vertically" },
    BufferNext => { "buffer_next", "Next Buffer", "Switch to next buffer",
        Navigation, Normal, "<leader>bn", Some("<cmd>bnext<CR>"), "Next buffer" },
    BufferPrev => { "buffer_prev", "Previous Buffer", "Switch to previous buffer",
        Navigation, Normal, "<leader>bp", Some("<cmd>bprev<CR>"), "Previous buffer" },
    BufferClose => { "buffer_close", "Close Buffer", "Close current buffer",
        Navigation, Normal, "<leader>bd", Some("<cmd>bdelete<CR>"), "Close buffer" },
    TerminalToggle => { "terminal_toggle", "Terminal", "Open terminal",
        Navigation, Normal, "<leader>t", Some("<cmd>terminal<CR>"), "Open terminal" },

    // Display
    ToggleWrap => { "toggle_wrap", "Toggle Wrap", "Toggle line wrapping",
        Display, Normal, "<leader>tw", Some("<cmd>set wrap!<CR>"), "Toggle line wrap" },
    ToggleNumbers => { "toggle_numbers", "Toggle Numbers", "Toggle line numbers",
        Display, Normal, "<leader>tn", Some("<cmd>set number! relativenumber!<CR>"), "Toggle line numbers" },

    // Terminal mode
    TerminalEscape => { "terminal_escape", "Exit Terminal Mode", "Return to normal mode from terminal",
        Terminal, Terminal, "<C-\\><C-n>", Some("<C-\\><C-n>"), "Exit terminal mode" },
    TerminalEscapeAlt => { "terminal_escape_alt", "Alt Exit Terminal", "Alternative way to exit terminal mode",
        Terminal, Terminal, "<C-w>N", Some("<C-\\><C-n>"), "Exit terminal mode" },
    TerminalNavLeft => { "terminal_nav_left", "Navigate Left", "Move to window on the left from terminal",
        Terminal, Terminal, "<C-w>h", Some("<C-\\><C-n><C-w>h"), "Move to left window" },
    TerminalNavRight => { "terminal_nav_right", "Navigate Right", "Move to window on the right from terminal",
        Terminal, Terminal, "<C-w>l", Some("<C-\\><C-n><C-w>l"), "Move to right window" },
    TerminalNavUp => { "terminal_nav_up", "Navigate Up", "Move to window above from terminal",
        Terminal, Terminal, "<C-w>k", Some("<C-\\><C-n><C-w>k"), "Move to upper window" },
    TerminalNavDown => { "terminal_nav_down", "Navigate Down", "Move to window below from terminal",
        Terminal, Terminal, "<C-w>j", Some("<C-\\><C-n><C-w>j"), "Move to lower window" },

    // NvimTree
    NvimTreeToggle => { "nvim_tree_toggle", "Toggle File Tree", "Open/close file explorer",
        Plugin, Normal, "<leader>e", Some("<cmd>NvimTreeToggle<CR>"), "Toggle file explorer" },
    NvimTreeFocus => { "nvim_tree_focus", "Focus File Tree", "Focus on file explorer",
        Plugin, Normal, "<leader>ef", Some("<cmd>NvimTreeFocus<CR>"), "Focus file explorer" },
    NvimTreeFindFile => { "nvim_tree_find_file", "Find Current File", "Find current file in tree",
        Plugin, Normal, "<leader>ec", Some("<cmd>NvimTreeFindFile<CR>"), "Find current file in explorer" },

    // Telescope
    TelescopeFindFiles => { "telescope_find_files", "Find Files", "Search and open files",
        Plugin, Normal, "<leader>ff",
        Some("function() require(\"telescope.builtin\").find_files() end"), "Find files" },
    TelescopeLiveGrep => { "telescope_live_grep", "Live Grep", "Search text in files",
        Plugin, Normal, "<leader>fg",
        Some("function() require(\"telescope.builtin\").live_grep() end"), "Search text in files" },
    TelescopeBuffers => { "telescope_buffers", "Buffers", "List and switch buffers",
        Plugin, Normal, "<leader>fb",
        Some("function() require(\"telescope.builtin\").buffers() end"), "List buffers" },
    TelescopeHelpTags => { "telescope_help_tags", "Help Tags", "Search help documentation",
        Plugin, Normal, "<leader>fh",
        Some("function() require(\"telescope.builtin\").help_tags() end"), "Help tags" },
    TelescopeGitFiles => { "telescope_git_files", "Git Files", "Search git-tracked files",
        Plugin, Normal, "<leader>gf",
        Some("function() require(\"telescope.builtin\").git_files() end"), "Git files" },

    // Tabbufline
    TabbuflineNextTab => { "tabbufline_next_tab", "Next Tab", "Switch to next tab",
        Plugin, Normal, "gt", Some("<cmd>tabnext<CR>"), "Next tab" },
    TabbuflinePrevTab => { "tabbufline_prev_tab", "Previous Tab", "Switch to previous tab",
        Plugin, Normal, "gT", Some("<cmd>tabprevious<CR>"), "Previous tab" },
    TabbuflineCloseTab => { "tabbufline_close_tab", "Close Tab", "Close current tab",
        Plugin, Normal, "<leader>tc", Some("<cmd>tabclose<CR>"), "Close tab" },
    TabbuflineNextBuffer => { "tabbufline_next_buffer", "Next Buffer", "Switch to next buffer in tab",
        Plugin, Normal, "<Tab>",
        Some("function() require(\"nvchad.tabufline\").next() end"), "Next buffer in tab" },
    TabbuflinePrevBuffer => { "tabbufline_prev_buffer", "Previous Buffer", "Switch to previous buffer in tab",
        Plugin, Normal, "<S-Tab>",
        Some("function() require(\"nvchad.tabufline\").prev() end"), "Previous buffer in tab" },
    TabbuflineCloseBuffer => { "tabbufline_close_buffer", "Close Buffer", "Close current buffer",
        Plugin, Normal, "<leader>x",
        Some("function() require(\"nvchad.tabufline\").close_buffer() end"), "Close buffer" },

    // nvim-dap
    DapToggleBreakpoint => { "dap_toggle_breakpoint", "Toggle Breakpoint", "Set/remove breakpoint",
        Plugin, Normal, "<leader>db",
        Some("function() require(\"dap\").toggle_breakpoint() end"), "Toggle breakpoint" },
    DapContinue => { "dap_continue", "Continue", "Continue debugging",
        Plugin, Normal, "<leader>dc",
        Some("function() require(\"dap\").continue() end"), "Debug continue" },
    DapStepOver => { "dap_step_over", "Step Over", "Step over line",
        Plugin, Normal, "<leader>do",
        Some("function() require(\"dap\").step_over() end"), "Debug step over" },
    DapStepInto => { "dap_step_into", "Step Into", "Step into function",
        Plugin, Normal, "<leader>di",
        Some("function() require(\"dap\").step_into() end"), "Debug step into" },
    DapStepOut => { "dap_step_out", "Step Out", "Step out of function",
        Plugin, Normal, "<leader>du",
        Some("function() require(\"dap\").step_out() end"), "Debug step out" },

    // GitSigns
    GitsignsNextHunk => { "gitsigns_next_hunk", "Next Hunk", "Go to next git change",
        Plugin, Normal, "]c",
        Some("function() require(\"gitsigns\").next_hunk() end"), "Next git hunk" },
    GitsignsPrevHunk => { "gitsigns_prev_hunk", "Previous Hunk", "Go to previous git change",
        Plugin, Normal, "[c",
        Some("function() require(\"gitsigns\").prev_hunk() end"), "Previous git hunk" },
    GitsignsStageHunk => { "gitsigns_stage_hunk", "Stage Hunk", "Stage current change",
        Plugin, Normal, "<leader>hs",
        Some("function() require(\"gitsigns\").stage_hunk() end"), "Stage git hunk" },
    GitsignsResetHunk => { "gitsigns_reset_hunk", "Reset Hunk", "Reset current change",
        Plugin, Normal, "<leader>hr",
        Some("function() require(\"gitsigns\").reset_hunk() end"), "Reset git hunk" },
    GitsignsPreviewHunk => { "gitsigns_preview_hunk", "Preview Hunk", "Preview git change",
        Plugin, Normal, "<leader>hp",
        Some("function() require(\"gitsigns\").preview_hunk() end"), "Preview git hunk" },

    // Which-key
    WhichKeyShow => { "which_key_show", "Show Keybindings", "Display available keybindings",
        Plugin, Normal, "<leader>?", Some("<cmd>WhichKey<CR>"), "Show keybindings" },
}

impl Action {
    pub fn id(self) -> &'static str {
        self.info().id
    }

    pub fn display_name(self) -> &'static str {
        self.info().name
    }

    pub fn description(self) -> &'static str {
        self.info().description
    }

    pub fn section(self) -> Section {
        self.info().section
    }

    pub fn mode(self) -> Mode {
        self.info().mode
    }

    /// Catalog default chord; never empty
    pub fn default_chord(self) -> &'static str {
        self.info().default_chord
    }

    /// Right-hand side emitted for this action, if the generator knows one
    pub fn command(self) -> Option<&'static str> {
        self.info().command
    }

    /// `desc` emitted alongside the binding
    pub fn binding_description(self) -> &'static str {
        self.info().binding_desc
    }

    /// Plugin that must be selected for this action to be active
    pub fn required_plugin(self) -> Option<Plugin> {
        match self {
            Action::NvimTreeToggle | Action::NvimTreeFocus | Action::NvimTreeFindFile => {
                Some(Plugin::NvimTree)
            }
            Action::TelescopeFindFiles
            | Action::TelescopeLiveGrep
            | Action::TelescopeBuffers
            | Action::TelescopeHelpTags
            | Action::TelescopeGitFiles => Some(Plugin::Telescope),
            Action::TabbuflineNextTab
            | Action::TabbuflinePrevTab
            | Action::TabbuflineCloseTab
            | Action::TabbuflineNextBuffer
            | Action::TabbuflinePrevBuffer
            | Action::TabbuflineCloseBuffer => Some(Plugin::Tabbufline),
            Action::DapToggleBreakpoint
            | Action::DapContinue
            | Action::DapStepOver
            | Action::DapStepInto
            | Action::DapStepOut => Some(Plugin::NvimDap),
            Action::GitsignsNextHunk
            | Action::GitsignsPrevHunk
            | Action::GitsignsStageHunk
            | Action::GitsignsResetHunk
            | Action::GitsignsPreviewHunk => Some(Plugin::Gitsigns),
            Action::WhichKeyShow => Some(Plugin::WhichKey),
            _ => None,
        }
    }
}

/// Whether a command template is a Lua function rather than a string rhs
pub fn is_lua_function(command: &str) -> bool {
    command.starts_with("function()")
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique_and_parse() {
        let mut seen = HashSet::new();
        for &action in Action::ALL {
            assert!(seen.insert(action.id()), "duplicate id {}", action.id());
            assert_eq!(Action::from_str(action.id()), Ok(action));
        }
    }

    #[test]
    fn test_unknown_action_id() {
        assert_eq!(Action::from_str("nonexistent_action"), Err(()));
    }

    #[test]
    fn test_every_default_chord_is_set() {
        for &action in Action::ALL {
            assert!(!action.default_chord().is_empty(), "{}", action);
        }
    }

    #[test]
    fn test_plugin_sections_require_plugins() {
        for &action in Action::ALL {
            assert_eq!(
                action.section() == Section::Plugin,
                action.required_plugin().is_some(),
                "{}",
                action
            );
        }
    }

    #[test]
    fn test_terminal_actions_use_terminal_mode() {
        assert_eq!(Action::TerminalEscape.mode(), Mode::Terminal);
        assert_eq!(Action::SaveFile.mode(), Mode::Normal);
    }

    #[test]
    fn test_function_commands() {
        let is_function = |action: Action| action.command().is_some_and(is_lua_function);
        assert!(is_function(Action::TelescopeFindFiles));
        assert!(!is_function(Action::SaveFile));
        assert!(!is_function(Action::OpenConfigWeb));
    }
}
