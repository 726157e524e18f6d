//! Plugin catalog and legacy setting flags

/// A selectable plugin
///
/// Catalog plugins render in the order of [`Plugin::known`], regardless of the
/// order they were selected in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Plugin {
    Treesitter,
    Telescope,
    NvimTree,
    Tabbufline,
    Dashboard,
    IndentBlankline,
    Lualine,
    NvimSurround,
    Gitsigns,
    WhichKey,
    NvimDap,
    NvimNotify,
    /// User-added plugin, selected as `custom-<slug>`
    Custom(String),
    Unrecognized(String),
}

impl Plugin {
    /// All catalog plugins in render order
    pub fn known() -> [Plugin; 12] {
        [
            Plugin::Treesitter,
            Plugin::Telescope,
            Plugin::NvimTree,
            Plugin::Tabbufline,
            Plugin::Dashboard,
            Plugin::IndentBlankline,
            Plugin::Lualine,
            Plugin::NvimSurround,
            Plugin::Gitsigns,
            Plugin::WhichKey,
            Plugin::NvimDap,
            Plugin::NvimNotify,
        ]
    }

    pub fn parse(id: &str) -> Plugin {
        match id {
            "treesitter" => Plugin::Treesitter,
            "telescope" => Plugin::Telescope,
            "nvim-tree" => Plugin::NvimTree,
            "tabbufline" => Plugin::Tabbufline,
            "dashboard" => Plugin::Dashboard,
            "indent-blankline" => Plugin::IndentBlankline,
            "lualine" => Plugin::Lualine,
            "nvim-surround" => Plugin::NvimSurround,
            "gitsigns" => Plugin::Gitsigns,
            "which-key" => Plugin::WhichKey,
            "nvim-dap" => Plugin::NvimDap,
            "nvim-notify" => Plugin::NvimNotify,
            other => match other.strip_prefix("custom-") {
                Some(slug) if is_valid_slug(slug) => Plugin::Custom(slug.to_string()),
                _ => Plugin::Unrecognized(other.to_string()),
            },
        }
    }

    /// The selection id (`custom-<slug>` for custom plugins)
    pub fn id(&self) -> String {
        match self {
            Plugin::Custom(slug) => format!("custom-{}", slug),
            Plugin::Unrecognized(id) => id.clone(),
            known => known.catalog_id().unwrap_or_default().to_string(),
        }
    }

    fn catalog_id(&self) -> Option<&'static str> {
        let id = match self {
            Plugin::Treesitter => "treesitter",
            Plugin::Telescope => "telescope",
            Plugin::NvimTree => "nvim-tree",
            Plugin::Tabbufline => "tabbufline",
            Plugin::Dashboard => "dashboard",
            Plugin::IndentBlankline => "indent-blankline",
            Plugin::Lualine => "lualine",
            Plugin::NvimSurround => "nvim-surround",
            Plugin::Gitsigns => "gitsigns",
            Plugin::WhichKey => "which-key",
            Plugin::NvimDap => "nvim-dap",
            Plugin::NvimNotify => "nvim-notify",
            Plugin::Custom(_) | Plugin::Unrecognized(_) => return None,
        };
        Some(id)
    }

    pub fn is_catalog(&self) -> bool {
        self.catalog_id().is_some()
    }

    pub fn title(&self) -> &str {
        match self {
            Plugin::Treesitter => "TreeSitter",
            Plugin::Telescope => "Telescope",
            Plugin::NvimTree => "NvimTree",
            Plugin::Tabbufline => "Tabufline",
            Plugin::Dashboard => "Dashboard",
            Plugin::IndentBlankline => "Indent Blankline",
            Plugin::Lualine => "Lualine",
            Plugin::NvimSurround => "nvim-surround",
            Plugin::Gitsigns => "GitSigns",
            Plugin::WhichKey => "Which Key",
            Plugin::NvimDap => "nvim-dap",
            Plugin::NvimNotify => "nvim-notify",
            Plugin::Custom(slug) | Plugin::Unrecognized(slug) => slug,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Plugin::Treesitter => "Advanced syntax highlighting and code parsing",
            Plugin::Telescope => "Fuzzy finder for files, buffers, and more",
            Plugin::NvimTree => "File explorer sidebar",
            Plugin::Tabbufline => "Tab and buffer line from NvChad UI",
            Plugin::Dashboard => "Start screen with quick actions",
            Plugin::IndentBlankline => "Indentation guides",
            Plugin::Lualine => "Fast and configurable statusline",
            Plugin::NvimSurround => "Add, change and delete surrounding pairs",
            Plugin::Gitsigns => "Git change signs and hunk actions",
            Plugin::WhichKey => "Popup with pending keybindings",
            Plugin::NvimDap => "Debug Adapter Protocol client with UI",
            Plugin::NvimNotify => "Animated notification manager",
            Plugin::Custom(_) => "User-added plugin",
            Plugin::Unrecognized(_) => "",
        }
    }
}

fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('/')
        && !slug.ends_with('/')
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/'))
}

/// Legacy on/off flags from the first version of the settings step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegacyFlag {
    LineNumbers,
    AutoSave,
    WrapText,
}

impl LegacyFlag {
    pub const ALL: [LegacyFlag; 3] = [
        LegacyFlag::LineNumbers,
        LegacyFlag::AutoSave,
        LegacyFlag::WrapText,
    ];

    pub fn parse(id: &str) -> Option<LegacyFlag> {
        match id {
            "line_numbers" => Some(LegacyFlag::LineNumbers),
            "auto_save" => Some(LegacyFlag::AutoSave),
            "wrap_text" => Some(LegacyFlag::WrapText),
            _ => None,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            LegacyFlag::LineNumbers => "line_numbers",
            LegacyFlag::AutoSave => "auto_save",
            LegacyFlag::WrapText => "wrap_text",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_plugins() {
        for plugin in Plugin::known() {
            assert_eq!(Plugin::parse(&plugin.id()), plugin);
            assert!(plugin.is_catalog());
        }
    }

    #[test]
    fn test_parse_custom_plugin() {
        assert_eq!(
            Plugin::parse("custom-harpoon"),
            Plugin::Custom("harpoon".to_string())
        );
        assert_eq!(
            Plugin::parse("custom-ThePrimeagen/harpoon").id(),
            "custom-ThePrimeagen/harpoon"
        );
    }

    #[test]
    fn test_malformed_custom_is_unrecognized() {
        assert!(matches!(Plugin::parse("custom-"), Plugin::Unrecognized(_)));
        assert!(matches!(
            Plugin::parse("custom-bad name"),
            Plugin::Unrecognized(_)
        ));
        assert!(matches!(Plugin::parse("vim-fugitive"), Plugin::Unrecognized(_)));
    }

    #[test]
    fn test_legacy_flags() {
        for flag in LegacyFlag::ALL {
            assert_eq!(LegacyFlag::parse(flag.id()), Some(flag));
        }
        assert_eq!(LegacyFlag::parse("bogus"), None);
    }
}
