//! Key-chord capture and chord parsing
//!
//! [`format_press`] turns one [`KeyPress`] into a chord token. [`ChordRecorder`]
//! strings presses together: a leader press keeps recording until one more key
//! arrives, anything else finishes immediately.

use super::types::{KeyCode, KeyPress, Modifiers};

/// Placeholder emitted for the leader key
pub const LEADER: &str = "<leader>";

/// Whether `token` is the configured leader (space leader matches `Space`)
fn is_leader(token: &str, leader: &str) -> bool {
    token == leader || (leader == " " && token == "Space")
}

/// Render one key press as a chord token
///
/// Returns `None` for presses that cannot end a chord (bare modifiers).
pub fn format_press(press: KeyPress, leader: &str) -> Option<String> {
    let token = press.key.token()?;

    // The leader wins over any modifiers held with it
    if is_leader(&token, leader) {
        return Some(LEADER.to_string());
    }

    if press.mods.is_empty() {
        return Some(match press.key {
            KeyCode::Char(_) => token,
            _ => format!("<{}>", token),
        });
    }

    Some(format!("<{}-{}>", press.mods.codes().join("-"), token))
}

/// Result of feeding one key press to a [`ChordRecorder`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capture {
    /// Press ignored; still recording
    Ignored,
    /// Leader captured; waiting for the next key
    Pending,
    /// Chord finished
    Complete(String),
}

/// Records a chord from successive key presses
#[derive(Debug, Clone)]
pub struct ChordRecorder {
    leader: String,
    pending: Option<String>,
}

impl ChordRecorder {
    pub fn new(leader: impl Into<String>) -> Self {
        Self {
            leader: leader.into(),
            pending: None,
        }
    }

    /// The partial sequence captured so far
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    pub fn press(&mut self, press: KeyPress) -> Capture {
        let Some(token) = format_press(press, &self.leader) else {
            return Capture::Ignored;
        };

        if let Some(prefix) = self.pending.take() {
            return Capture::Complete(format!("{}{}", prefix, token));
        }

        if token == LEADER {
            self.pending = Some(token);
            return Capture::Pending;
        }

        Capture::Complete(token)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Record a whole sequence of presses, returning the first finished chord
    pub fn record(leader: &str, presses: impl IntoIterator<Item = KeyPress>) -> Option<String> {
        let mut recorder = ChordRecorder::new(leader);
        for press in presses {
            if let Capture::Complete(chord) = recorder.press(press) {
                return Some(chord);
            }
        }
        None
    }
}

/// Split a chord string into tokens
///
/// `<...>` groups are one token each; everything else is one token per
/// character. An unterminated `<` is a plain character.
pub fn parse_chord(chord: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut rest = chord;

    while let Some(c) = rest.chars().next() {
        if c == '<' {
            if let Some(close) = rest.find('>') {
                tokens.push(rest[..=close].to_string());
                rest = &rest[close + 1..];
                continue;
            }
        }
        tokens.push(c.to_string());
        rest = &rest[c.len_utf8()..];
    }

    tokens
}

/// Tokens for display chips: `<leader>` shows as `Leader`, brackets dropped
pub fn display_tokens(chord: &str) -> Vec<String> {
    parse_chord(chord)
        .into_iter()
        .map(|token| {
            if token == LEADER {
                "Leader".to_string()
            } else if token.len() > 2 && token.starts_with('<') && token.ends_with('>') {
                token[1..token.len() - 1].to_string()
            } else {
                token
            }
        })
        .collect()
}
