use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Keys shown on the virtual QWERTY keyboard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Key {
    Grave,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
    Digit0,
    Minus,
    Equal,
    Backspace,
    Tab,
    Q,
    W,
    E,
    R,
    T,
    Y,
    U,
    I,
    O,
    P,
    LeftBracket,
    RightBracket,
    Backslash,
    CapsLock,
    A,
    S,
    D,
    F,
    G,
    H,
    J,
    K,
    L,
    Semicolon,
    Quote,
    Return,
    LeftShift,
    Z,
    X,
    C,
    V,
    B,
    N,
    M,
    Comma,
    Period,
    Slash,
    RightShift,
    LeftControl,
    LeftAlt,
    Space,
    RightAlt,
    RightControl,
    Escape,
}

/// `(key, unshifted symbol, shifted symbol)` in row order. Symbols use X11
/// keysym spelling.
const QWERTY_KEYS: &[(Key, &str, Option<&str>)] = &[
    (Key::Escape, "Escape", None),
    (Key::Grave, "grave", Some("asciitilde")),
    (Key::Digit1, "1", Some("exclam")),
    (Key::Digit2, "2", Some("at")),
    (Key::Digit3, "3", Some("numbersign")),
    (Key::Digit4, "4", Some("dollar")),
    (Key::Digit5, "5", Some("percent")),
    (Key::Digit6, "6", Some("asciicircum")),
    (Key::Digit7, "7", Some("ampersand")),
    (Key::Digit8, "8", Some("asterisk")),
    (Key::Digit9, "9", Some("parenleft")),
    (Key::Digit0, "0", Some("parenright")),
    (Key::Minus, "minus", Some("underscore")),
    (Key::Equal, "equal", Some("plus")),
    (Key::Backspace, "BackSpace", None),
    (Key::Tab, "Tab", None),
    (Key::Q, "q", Some("Q")),
    (Key::W, "w", Some("W")),
    (Key::E, "e", Some("E")),
    (Key::R, "r", Some("R")),
    (Key::T, "t", Some("T")),
    (Key::Y, "y", Some("Y")),
    (Key::U, "u", Some("U")),
    (Key::I, "i", Some("I")),
    (Key::O, "o", Some("O")),
    (Key::P, "p", Some("P")),
    (Key::LeftBracket, "bracketleft", Some("braceleft")),
    (Key::RightBracket, "bracketright", Some("braceright")),
    (Key::Backslash, "backslash", Some("bar")),
    (Key::CapsLock, "Caps_Lock", None),
    (Key::A, "a", Some("A")),
    (Key::S, "s", Some("S")),
    (Key::D, "d", Some("D")),
    (Key::F, "f", Some("F")),
    (Key::G, "g", Some("G")),
    (Key::H, "h", Some("H")),
    (Key::J, "j", Some("J")),
    (Key::K, "k", Some("K")),
    (Key::L, "l", Some("L")),
    (Key::Semicolon, "semicolon", Some("colon")),
    (Key::Quote, "apostrophe", Some("quotedbl")),
    (Key::Return, "Return", None),
    (Key::LeftShift, "Shift_L", None),
    (Key::Z, "z", Some("Z")),
    (Key::X, "x", Some("X")),
    (Key::C, "c", Some("C")),
    (Key::V, "v", Some("V")),
    (Key::B, "b", Some("B")),
    (Key::N, "n", Some("N")),
    (Key::M, "m", Some("M")),
    (Key::Comma, "comma", Some("less")),
    (Key::Period, "period", Some("greater")),
    (Key::Slash, "slash", Some("question")),
    (Key::RightShift, "Shift_R", None),
    (Key::LeftControl, "Control_L", None),
    (Key::LeftAlt, "Alt_L", None),
    (Key::Space, "space", None),
    (Key::RightAlt, "Alt_R", None),
    (Key::RightControl, "Control_R", None),
];

/// Named keysyms that produce a printable character.
const NAMED_CHARS: &[(&str, char)] = &[
    ("space", ' '),
    ("grave", '`'),
    ("asciitilde", '~'),
    ("exclam", '!'),
    ("at", '@'),
    ("numbersign", '#'),
    ("dollar", '$'),
    ("percent", '%'),
    ("asciicircum", '^'),
    ("ampersand", '&'),
    ("asterisk", '*'),
    ("parenleft", '('),
    ("parenright", ')'),
    ("minus", '-'),
    ("underscore", '_'),
    ("equal", '='),
    ("plus", '+'),
    ("bracketleft", '['),
    ("braceleft", '{'),
    ("bracketright", ']'),
    ("braceright", '}'),
    ("backslash", '\\'),
    ("bar", '|'),
    ("semicolon", ';'),
    ("colon", ':'),
    ("apostrophe", '\''),
    ("quotedbl", '"'),
    ("comma", ','),
    ("less", '<'),
    ("period", '.'),
    ("greater", '>'),
    ("slash", '/'),
    ("question", '?'),
];

static QWERTY: Lazy<KeyboardLayout> = Lazy::new(|| KeyboardLayout::new(QWERTY_KEYS));

/// Character typed by `symbol`: single-character keysyms stand for
/// themselves, punctuation uses its keysym name.
pub fn char_for_symbol(symbol: &str) -> Option<char> {
    let mut chars = symbol.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if !ch.is_control() => Some(ch),
        _ => NAMED_CHARS
            .iter()
            .find(|(name, _)| *name == symbol)
            .map(|&(_, ch)| ch),
    }
}

impl Key {
    /// Unshifted keysym of the key.
    pub fn symbol(self) -> &'static str {
        QWERTY_KEYS
            .iter()
            .find(|(key, _, _)| *key == self)
            .map_or("", |&(_, symbol, _)| symbol)
    }
}

/// The displayable keys plus a symbol-to-key index built once.
#[derive(Debug, Clone)]
pub struct KeyboardLayout {
    keys: Vec<Key>,
    by_symbol: HashMap<&'static str, Key>,
}

impl KeyboardLayout {
    fn new(entries: &[(Key, &'static str, Option<&'static str>)]) -> Self {
        let mut keys = Vec::with_capacity(entries.len());
        let mut by_symbol = HashMap::with_capacity(entries.len() * 2);
        for &(key, symbol, shifted) in entries {
            keys.push(key);
            by_symbol.insert(symbol, key);
            if let Some(shifted) = shifted {
                by_symbol.insert(shifted, key);
            }
        }
        Self { keys, by_symbol }
    }

    pub fn qwerty() -> &'static KeyboardLayout {
        &QWERTY
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn resolve(&self, symbol: &str) -> Option<Key> {
        self.by_symbol.get(symbol).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::translator::DISABLED_SYMBOL;

    #[test]
    fn resolves_both_cases_to_the_same_key() {
        let layout = KeyboardLayout::qwerty();
        assert_eq!(layout.resolve("q"), Some(Key::Q));
        assert_eq!(layout.resolve("Q"), Some(Key::Q));
        assert_eq!(layout.resolve("exclam"), Some(Key::Digit1));
        assert_eq!(layout.resolve("Shift_R"), Some(Key::RightShift));
    }

    #[test]
    fn unknown_and_disabled_symbols_do_not_resolve() {
        let layout = KeyboardLayout::qwerty();
        assert_eq!(layout.resolve(DISABLED_SYMBOL), None);
        assert_eq!(layout.resolve("F13"), None);
        assert_eq!(layout.resolve(""), None);
    }

    #[test]
    fn printable_symbols_map_to_characters() {
        assert_eq!(char_for_symbol("a"), Some('a'));
        assert_eq!(char_for_symbol("Q"), Some('Q'));
        assert_eq!(char_for_symbol("space"), Some(' '));
        assert_eq!(char_for_symbol("comma"), Some(','));
        assert_eq!(char_for_symbol("ñ"), Some('ñ'));
        assert_eq!(char_for_symbol("BackSpace"), None);
        assert_eq!(char_for_symbol(DISABLED_SYMBOL), None);
        assert_eq!(char_for_symbol("\t"), None);
    }

    #[test]
    fn every_key_resolves_from_its_symbol() {
        let layout = KeyboardLayout::qwerty();
        for &key in layout.keys() {
            assert_eq!(layout.resolve(key.symbol()), Some(key), "{key:?}");
        }
    }
}
