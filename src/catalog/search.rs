//! Fuzzy plugin search
//!
//! Matches a free-form query against the plugin catalog and a small directory
//! of well-known community plugins. Community hits map to `custom-<owner/repo>`
//! ids so they render as real lazy specs.

use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

use super::plugin::Plugin;

/// Maximum number of results returned by [`search_plugins`]
pub const MAX_RESULTS: usize = 6;

/// Community plugins offered alongside the catalog
const COMMUNITY: &[(&str, &str, &str)] = &[
    (
        "stevearc/oil.nvim",
        "oil.nvim",
        "Neovim file explorer: edit your filesystem like a buffer",
    ),
    (
        "hrsh7th/nvim-cmp",
        "nvim-cmp",
        "A completion plugin for neovim coded in Lua",
    ),
    (
        "echasnovski/mini.files",
        "mini.files",
        "Navigate and manipulate file system",
    ),
    (
        "ThePrimeagen/harpoon",
        "harpoon",
        "Mark and jump between frequently used files",
    ),
    (
        "folke/trouble.nvim",
        "trouble.nvim",
        "Pretty list for diagnostics, references and quickfix",
    ),
    (
        "windwp/nvim-autopairs",
        "nvim-autopairs",
        "Autopairs for neovim written in lua",
    ),
    (
        "numToStr/Comment.nvim",
        "Comment.nvim",
        "Smart and powerful comment plugin",
    ),
];

/// A single search hit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Selection id to add (`custom-<owner/repo>` for community plugins)
    pub id: String,
    pub title: String,
    pub description: String,
    pub score: u32,
}

/// Search the catalog and community directory, best matches first
///
/// An empty query returns nothing.
pub fn search_plugins(query: &str) -> Vec<SearchHit> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    let pattern = Pattern::parse(query, CaseMatching::Ignore, Normalization::Smart);
    let mut matcher = Matcher::new(Config::DEFAULT);
    let mut buf = Vec::new();

    let candidates = Plugin::known()
        .into_iter()
        .map(|plugin| {
            (
                plugin.id(),
                plugin.title().to_string(),
                plugin.description().to_string(),
            )
        })
        .chain(COMMUNITY.iter().map(|(repo, title, desc)| {
            (
                Plugin::Custom(repo.to_string()).id(),
                title.to_string(),
                desc.to_string(),
            )
        }));

    let mut hits: Vec<SearchHit> = candidates
        .filter_map(|(id, title, description)| {
            let haystack = format!("{} {} {}", id, title, description);
            let score = pattern.score(Utf32Str::new(&haystack, &mut buf), &mut matcher)?;
            Some(SearchHit {
                id,
                title,
                description,
                score,
            })
        })
        .collect();

    hits.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
    hits.truncate(MAX_RESULTS);
    tracing::debug!(query, hits = hits.len(), "plugin search");
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query() {
        assert!(search_plugins("   ").is_empty());
    }

    #[test]
    fn test_finds_catalog_plugin() {
        let hits = search_plugins("telescope");
        assert_eq!(hits.first().map(|h| h.id.as_str()), Some("telescope"));
    }

    #[test]
    fn test_community_hits_are_custom_ids() {
        let hits = search_plugins("oil");
        assert!(hits.iter().any(|h| h.id == "custom-stevearc/oil.nvim"));
    }

    #[test]
    fn test_results_are_capped() {
        assert!(search_plugins("e").len() <= MAX_RESULTS);
    }
}
