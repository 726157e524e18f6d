//! Shareable selection links
//!
//! A selection is encoded as query parameters:
//!
//! | param       | value                                         |
//! |-------------|-----------------------------------------------|
//! | `languages` | comma-joined language ids                     |
//! | `theme`     | theme id                                      |
//! | `plugins`   | comma-joined plugin ids                       |
//! | `settings`  | comma-joined legacy flags                     |
//! | `config`    | JSON object of changed settings               |
//! | `leader`    | leader key                                    |
//! | `keymaps`   | JSON object of keymap overrides               |
//!
//! Decoding is total: a malformed parameter falls back to that field's
//! default and the rest of the link still applies.

use serde_json::{Map, Value};
use url::form_urlencoded;
use url::Url;

use crate::catalog::all_settings;
use crate::keymap::KeymapOverrides;
use crate::selection::{unique_ids, Selection, DEFAULT_LEADER};
use crate::settings::Settings;

/// Encode a selection as a query string (without the leading `?`)
///
/// Empty fields are omitted; `config` carries only settings that differ from
/// their defaults.
pub fn to_query(selection: &Selection) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());

    if !selection.languages.is_empty() {
        query.append_pair("languages", &selection.languages.join(","));
    }
    if !selection.theme.is_empty() {
        query.append_pair("theme", &selection.theme);
    }
    if !selection.plugins.is_empty() {
        query.append_pair("plugins", &selection.plugins.join(","));
    }
    if !selection.flags.is_empty() {
        query.append_pair("settings", &selection.flags.join(","));
    }

    let changed = changed_settings_tree(&selection.settings);
    if !changed.as_map().is_empty() {
        if let Ok(json) = serde_json::to_string(&changed) {
            query.append_pair("config", &json);
        }
    }

    if selection.leader_key != DEFAULT_LEADER {
        query.append_pair("leader", &selection.leader_key);
    }
    if !selection.keymaps.is_empty() {
        if let Ok(json) = serde_json::to_string(&selection.keymaps) {
            query.append_pair("keymaps", &json);
        }
    }

    query.finish()
}

/// Decode a query string (leading `?` optional) into a selection
pub fn from_query(query: &str) -> Selection {
    let query = query.trim().trim_start_matches('?');
    let mut selection = Selection::default();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "languages" => selection.languages = split_list(&value),
            "theme" => selection.theme = value.trim().to_string(),
            "plugins" => selection.plugins = split_list(&value),
            "settings" => selection.flags = split_list(&value),
            "config" => selection.settings = decode_settings(&value),
            "leader" => {
                if !value.is_empty() {
                    selection.leader_key = value.into_owned();
                }
            }
            "keymaps" => selection.keymaps = decode_keymaps(&value),
            other => tracing::debug!("Ignoring unknown share parameter: {}", other),
        }
    }

    selection
}

/// Full share URL: `base` with the selection's query replacing any existing one
pub fn share_url(base: &str, selection: &Selection) -> Result<String, url::ParseError> {
    let mut url = Url::parse(base)?;
    let query = to_query(selection);
    url.set_query(if query.is_empty() { None } else { Some(&query) });
    Ok(url.to_string())
}

/// Decode from a full URL or a bare query string
pub fn from_link(link: &str) -> Selection {
    match Url::parse(link) {
        Ok(url) => from_query(url.query().unwrap_or_default()),
        Err(_) => from_query(link),
    }
}

fn split_list(value: &str) -> Vec<String> {
    unique_ids(value.split(','))
}

fn changed_settings_tree(settings: &Settings) -> Settings {
    all_settings()
        .filter(|def| settings.is_changed(def.id))
        .fold(Settings::empty(), |tree, def| match settings.get_effective(def.id) {
            Some(value) => tree.set_effective(def.id, value),
            None => tree,
        })
}

fn decode_settings(json: &str) -> Settings {
    match serde_json::from_str::<Map<String, Value>>(json) {
        Ok(map) => {
            let sparse = Settings::from_map(map);
            // Start from the fresh-session tree so the result matches a local edit
            all_settings()
                .filter_map(|def| sparse.get_explicit(def.id).map(|v| (def.id, v.clone())))
                .fold(Settings::default(), |tree, (id, value)| {
                    tree.set_effective(id, value)
                })
        }
        Err(e) => {
            tracing::warn!("Ignoring malformed settings in share link: {}", e);
            Settings::default()
        }
    }
}

fn decode_keymaps(json: &str) -> KeymapOverrides {
    match serde_json::from_str::<Map<String, Value>>(json) {
        Ok(map) => map
            .into_iter()
            .filter_map(|(action, chord)| match chord {
                Value::String(chord) => Some((action, chord)),
                _ => None,
            })
            .collect(),
        Err(e) => {
            tracing::warn!("Ignoring malformed keymaps in share link: {}", e);
            KeymapOverrides::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Selection {
        Selection::default()
            .with_languages(["python", "rust"])
            .with_theme("gruvbox")
            .with_plugins(["telescope", "custom-stevearc/oil.nvim"])
            .with_setting("indentSize", json!(4))
            .with_setting("telescope.historyLimit", json!(300))
            .with_leader(",")
            .with_keymap("save_file", "<C-s>")
    }

    #[test]
    fn test_encode_then_decode() {
        let selection = sample();
        assert_eq!(from_query(&to_query(&selection)), selection);
    }

    #[test]
    fn test_empty_selection_has_empty_query() {
        assert_eq!(to_query(&Selection::default()), "");
        assert_eq!(from_query(""), Selection::default());
    }

    #[test]
    fn test_only_changed_settings_are_shared() {
        let query = to_query(&sample());
        let config = form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == "config")
            .map(|(_, v)| v.into_owned())
            .unwrap();
        let value: Value = serde_json::from_str(&config).unwrap();
        assert_eq!(
            value,
            json!({"indentSize": 4, "telescope": {"historyLimit": 300}})
        );
    }

    #[test]
    fn test_malformed_keymaps_only_drop_keymaps() {
        let selection = from_query("languages=go&keymaps=%7Bnot-json&theme=nord");
        assert_eq!(selection.languages, vec!["go"]);
        assert_eq!(selection.theme, "nord");
        assert!(selection.keymaps.is_empty());
    }

    #[test]
    fn test_malformed_config_falls_back() {
        let selection = from_query("config=%5B1%2C2%5D&plugins=lualine");
        assert_eq!(selection.settings, Settings::default());
        assert_eq!(selection.plugins, vec!["lualine"]);
    }

    #[test]
    fn test_space_leader_default_roundtrip() {
        let query = to_query(&Selection::default().with_languages(["go"]));
        assert!(!query.contains("leader"));
        let selection = from_query("leader=+");
        assert_eq!(selection.leader_key, " ");
    }

    #[test]
    fn test_share_url_and_link() {
        let url = share_url("https://example.com/wizard?old=1", &sample()).unwrap();
        assert!(url.starts_with("https://example.com/wizard?languages=python%2Crust"));
        assert!(!url.contains("old=1"));
        assert_eq!(from_link(&url), sample());
    }
}
