//! Core types for chord capture: Modifiers, KeyCode, KeyPress

use std::fmt;

/// Modifier keys as a bitfield
///
/// Bits are laid out in chord order so iterating them yields `C`, `A`, `S`, `D`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(0b0001);
    pub const ALT: Modifiers = Modifiers(0b0010);
    pub const SHIFT: Modifiers = Modifiers(0b0100);
    pub const META: Modifiers = Modifiers(0b1000); // Cmd on macOS, Win elsewhere

    pub const fn new(ctrl: bool, alt: bool, shift: bool, meta: bool) -> Self {
        let mut bits = 0u8;
        if ctrl {
            bits |= 0b0001;
        }
        if alt {
            bits |= 0b0010;
        }
        if shift {
            bits |= 0b0100;
        }
        if meta {
            bits |= 0b1000;
        }
        Modifiers(bits)
    }

    #[inline]
    pub const fn ctrl(self) -> bool {
        self.0 & 0b0001 != 0
    }

    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & 0b0010 != 0
    }

    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & 0b0100 != 0
    }

    #[inline]
    pub const fn meta(self) -> bool {
        self.0 & 0b1000 != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    #[inline]
    pub const fn without(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 & !other.0)
    }

    /// Single-letter chord codes in fixed order
    pub fn codes(self) -> Vec<&'static str> {
        let mut codes = Vec::with_capacity(4);
        if self.ctrl() {
            codes.push("C");
        }
        if self.alt() {
            codes.push("A");
        }
        if self.shift() {
            codes.push("S");
        }
        if self.meta() {
            codes.push("D");
        }
        codes
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.codes().join("-"))
    }
}

/// A key as reported by the input layer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character, case preserved
    Char(char),

    Space,
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,

    Up,
    Down,
    Left,
    Right,

    Home,
    End,
    PageUp,
    PageDown,
    Insert,

    F(u8),

    /// A bare modifier press (`Shift`, `Control`, ...)
    Modifier,
}

impl KeyCode {
    /// Parse a key name in the style browsers and terminals report them
    ///
    /// Returns `None` for names that have no chord rendering.
    pub fn from_name(name: &str) -> Option<KeyCode> {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Some(if c == ' ' {
                KeyCode::Space
            } else {
                KeyCode::Char(c)
            });
        }

        let key = match name {
            "Space" | "space" => KeyCode::Space,
            "Enter" | "Return" | "CR" => KeyCode::Enter,
            "Escape" | "Esc" => KeyCode::Escape,
            "Backspace" | "BS" => KeyCode::Backspace,
            "Delete" | "Del" => KeyCode::Delete,
            "Tab" => KeyCode::Tab,
            "ArrowUp" | "Up" => KeyCode::Up,
            "ArrowDown" | "Down" => KeyCode::Down,
            "ArrowLeft" | "Left" => KeyCode::Left,
            "ArrowRight" | "Right" => KeyCode::Right,
            "Home" => KeyCode::Home,
            "End" => KeyCode::End,
            "PageUp" => KeyCode::PageUp,
            "PageDown" => KeyCode::PageDown,
            "Insert" => KeyCode::Insert,
            "Control" | "Alt" | "Shift" | "Meta" | "OS" => KeyCode::Modifier,
            other => {
                let n: u8 = other.strip_prefix('F')?.parse().ok()?;
                if (1..=99).contains(&n) {
                    KeyCode::F(n)
                } else {
                    return None;
                }
            }
        };
        Some(key)
    }

    /// Normalized chord token; `None` for bare modifiers
    pub fn token(self) -> Option<String> {
        let token = match self {
            KeyCode::Char(c) => return Some(c.to_string()),
            KeyCode::F(n) => return Some(format!("F{}", n)),
            KeyCode::Space => "Space",
            KeyCode::Enter => "CR",
            KeyCode::Escape => "Esc",
            KeyCode::Backspace => "BS",
            KeyCode::Delete => "Del",
            KeyCode::Tab => "Tab",
            KeyCode::Up => "Up",
            KeyCode::Down => "Down",
            KeyCode::Left => "Left",
            KeyCode::Right => "Right",
            KeyCode::Home => "Home",
            KeyCode::End => "End",
            KeyCode::PageUp => "PageUp",
            KeyCode::PageDown => "PageDown",
            KeyCode::Insert => "Insert",
            KeyCode::Modifier => return None,
        };
        Some(token.to_string())
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token().unwrap_or_default())
    }
}

/// A single key press: a key with modifiers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyPress {
    pub key: KeyCode,
    pub mods: Modifiers,
}

impl KeyPress {
    pub const fn new(key: KeyCode, mods: Modifiers) -> Self {
        Self { key, mods }
    }

    pub const fn key(key: KeyCode) -> Self {
        Self {
            key,
            mods: Modifiers::NONE,
        }
    }

    pub const fn char(c: char) -> Self {
        Self {
            key: KeyCode::Char(c),
            mods: Modifiers::NONE,
        }
    }

    pub const fn char_with_mods(c: char, mods: Modifiers) -> Self {
        Self {
            key: KeyCode::Char(c),
            mods,
        }
    }

    /// Parse `ctrl+shift+x` style descriptions used on the command line
    pub fn parse(desc: &str) -> Option<KeyPress> {
        if desc == "+" {
            return Some(KeyPress::char('+'));
        }
        let mut mods = Modifiers::NONE;
        let mut key = None;
        for part in desc.split('+') {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => mods = mods | Modifiers::CTRL,
                "alt" | "option" => mods = mods | Modifiers::ALT,
                "shift" => mods = mods | Modifiers::SHIFT,
                "meta" | "cmd" | "super" | "win" => mods = mods | Modifiers::META,
                _ => {
                    if key.is_some() {
                        return None;
                    }
                    key = Some(KeyCode::from_name(part)?);
                }
            }
        }
        key.map(|key| KeyPress::new(key, mods))
    }
}

impl fmt::Display for KeyPress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mods.is_empty() {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{}-{}", self.mods, self.key)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_codes_fixed_order() {
        let mods = Modifiers::META | Modifiers::SHIFT | Modifiers::CTRL | Modifiers::ALT;
        assert_eq!(mods.codes(), vec!["C", "A", "S", "D"]);
    }

    #[test]
    fn test_modifiers_new() {
        let mods = Modifiers::new(true, false, true, false);
        assert!(mods.ctrl());
        assert!(!mods.alt());
        assert!(mods.shift());
        assert!(!mods.meta());
        assert!(!mods.without(Modifiers::SHIFT).shift());
    }

    #[test]
    fn test_named_keys() {
        assert_eq!(KeyCode::from_name(" "), Some(KeyCode::Space));
        assert_eq!(KeyCode::from_name("ArrowLeft"), Some(KeyCode::Left));
        assert_eq!(KeyCode::from_name("Enter").and_then(|k| k.token()), Some("CR".into()));
        assert_eq!(KeyCode::from_name("F12"), Some(KeyCode::F(12)));
        assert_eq!(KeyCode::from_name("Shift"), Some(KeyCode::Modifier));
        assert_eq!(KeyCode::from_name("MediaPlay"), None);
    }

    #[test]
    fn test_char_case_preserved() {
        assert_eq!(KeyCode::Char('X').token(), Some("X".into()));
        assert_ne!(KeyPress::char('a'), KeyPress::char('A'));
    }

    #[test]
    fn test_parse_keypress() {
        let press = KeyPress::parse("ctrl+shift+X").unwrap();
        assert_eq!(press.key, KeyCode::Char('X'));
        assert!(press.mods.ctrl() && press.mods.shift());
        assert_eq!(KeyPress::parse("space"), Some(KeyPress::key(KeyCode::Space)));
        assert_eq!(KeyPress::parse("ctrl+a+b"), None);
    }
}
