//! Colorscheme catalog

/// A selectable colorscheme
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Theme {
    Catppuccin,
    Gruvbox,
    TokyoNight,
    Nord,
    OneDark,
    /// Keep the editor's built-in colorscheme
    Default,
    Unrecognized(String),
}

impl Theme {
    pub fn known() -> [Theme; 6] {
        [
            Theme::Catppuccin,
            Theme::Gruvbox,
            Theme::TokyoNight,
            Theme::Nord,
            Theme::OneDark,
            Theme::Default,
        ]
    }

    /// Parse a theme id; the empty string means no theme override
    pub fn parse(id: &str) -> Option<Theme> {
        let theme = match id.trim() {
            "" => return None,
            "catppuccin" => Theme::Catppuccin,
            "gruvbox" => Theme::Gruvbox,
            "tokyonight" => Theme::TokyoNight,
            "nord" => Theme::Nord,
            "onedark" => Theme::OneDark,
            "default" => Theme::Default,
            other => Theme::Unrecognized(other.to_string()),
        };
        Some(theme)
    }

    pub fn id(&self) -> &str {
        match self {
            Theme::Catppuccin => "catppuccin",
            Theme::Gruvbox => "gruvbox",
            Theme::TokyoNight => "tokyonight",
            Theme::Nord => "nord",
            Theme::OneDark => "onedark",
            Theme::Default => "default",
            Theme::Unrecognized(id) => id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Theme::Catppuccin => "Catppuccin",
            Theme::Gruvbox => "Gruvbox",
            Theme::TokyoNight => "Tokyo Night",
            Theme::Nord => "Nord",
            Theme::OneDark => "One Dark",
            Theme::Default => "Default",
            Theme::Unrecognized(id) => id,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Theme::Catppuccin => "Soothing pastel theme with excellent contrast",
            Theme::Gruvbox => "Retro groove color scheme with warm colors",
            Theme::TokyoNight => "Clean dark theme inspired by Tokyo's night",
            Theme::Nord => "Arctic, north-bluish color palette",
            Theme::OneDark => "Atom's iconic One Dark theme",
            Theme::Default => "Keep Neovim's default color scheme",
            Theme::Unrecognized(_) => "",
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Theme::Default)
    }

    /// lazy.nvim spec that installs the colorscheme
    pub fn plugin_spec(&self) -> Option<&'static str> {
        match self {
            Theme::Catppuccin => Some(r#"{ "catppuccin/nvim", name = "catppuccin", priority = 1000 }"#),
            Theme::Gruvbox => Some(r#"{ "ellisonleao/gruvbox.nvim", priority = 1000 }"#),
            Theme::TokyoNight => Some(r#"{ "folke/tokyonight.nvim", lazy = false, priority = 1000 }"#),
            Theme::Nord => Some(r#"{ "shaunsingh/nord.nvim", priority = 1000 }"#),
            Theme::OneDark => Some(r#"{ "navarasu/onedark.nvim", priority = 1000 }"#),
            Theme::Default | Theme::Unrecognized(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_theme_is_none() {
        assert_eq!(Theme::parse(""), None);
        assert_eq!(Theme::parse("  "), None);
    }

    #[test]
    fn test_default_has_no_plugin() {
        let theme = Theme::parse("default").unwrap();
        assert!(theme.is_default());
        assert!(theme.plugin_spec().is_none());
    }

    #[test]
    fn test_known_themes_have_plugins() {
        for theme in Theme::known() {
            if !theme.is_default() {
                assert!(theme.plugin_spec().is_some(), "{} has no spec", theme.id());
            }
        }
    }
}
