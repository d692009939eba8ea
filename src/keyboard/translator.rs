use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Symbol produced for a disabled key. No layout key carries it, so it
/// never resolves to anything downstream.
pub const DISABLED_SYMBOL: &str = "<disabled>";

/// Key-pairs swapped by the corrupted keyboard: letters mirrored within their
/// QWERTY row, except `g↔v`, which crosses rows.
const MIRRORED_PAIRS: [(char, char); 13] = [
    ('q', 'p'),
    ('w', 'o'),
    ('e', 'i'),
    ('r', 'u'),
    ('t', 'y'),
    ('a', 'l'),
    ('s', 'k'),
    ('d', 'j'),
    ('f', 'h'),
    ('g', 'v'),
    ('z', 'm'),
    ('x', 'n'),
    ('c', 'b'),
];

static CORRUPTED: Lazy<KeySubstitutionTable> = Lazy::new(|| {
    MIRRORED_PAIRS
        .iter()
        .fold(KeySubstitutionTable::identity(), |table, &(a, b)| {
            table
                .swap(a.to_string(), b.to_string())
                .swap(a.to_ascii_uppercase().to_string(), b.to_ascii_uppercase().to_string())
        })
});

static CORRUPTED_BACKSPACE: Lazy<KeySubstitutionTable> =
    Lazy::new(|| KeySubstitutionTable::identity().absorb("BackSpace"));

/// Fixed symbol-to-symbol remapping. Symbols without an entry map to
/// themselves.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct KeySubstitutionTable {
    entries: HashMap<String, String>,
}

impl KeySubstitutionTable {
    pub fn identity() -> Self {
        Self::default()
    }

    /// The mirrored-QWERTY table: `q↔p`, `a↔l`, `z↔m` and so on, in both
    /// cases.
    pub fn corrupted() -> Self {
        CORRUPTED.clone()
    }

    /// Identity everywhere except `BackSpace`, which is disabled.
    pub fn corrupted_backspace() -> Self {
        CORRUPTED_BACKSPACE.clone()
    }

    pub fn insert(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.entries.insert(from.into(), to.into());
        self
    }

    /// Maps `a` to `b` and `b` to `a`.
    pub fn swap(self, a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        self.insert(a.clone(), b.clone()).insert(b, a)
    }

    /// Maps `symbol` to [`DISABLED_SYMBOL`].
    pub fn absorb(self, symbol: impl Into<String>) -> Self {
        self.insert(symbol, DISABLED_SYMBOL)
    }

    pub fn get(&self, symbol: &str) -> Option<&str> {
        self.entries.get(symbol).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when every entry is half of a swap, i.e. translating twice gives
    /// the symbol back. Absorb entries are ignored.
    pub fn is_symmetric(&self) -> bool {
        self.entries
            .iter()
            .filter(|(_, to)| to.as_str() != DISABLED_SYMBOL)
            .all(|(from, to)| self.get(to) == Some(from.as_str()))
    }
}

/// Built-in keyboard variants.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum KeyboardVariant {
    Standard,
    Corrupted,
    CorruptedBackspace,
}

impl KeyboardVariant {
    pub fn table(self) -> KeySubstitutionTable {
        match self {
            KeyboardVariant::Standard => KeySubstitutionTable::identity(),
            KeyboardVariant::Corrupted => KeySubstitutionTable::corrupted(),
            KeyboardVariant::CorruptedBackspace => KeySubstitutionTable::corrupted_backspace(),
        }
    }
}

impl Default for KeyboardVariant {
    fn default() -> Self {
        KeyboardVariant::Standard
    }
}

impl fmt::Display for KeyboardVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KeyboardVariant::Standard => "standard",
            KeyboardVariant::Corrupted => "corrupted",
            KeyboardVariant::CorruptedBackspace => "corrupted_backspace",
        })
    }
}

impl FromStr for KeyboardVariant {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "standard" | "normal" => Ok(KeyboardVariant::Standard),
            "corrupted" => Ok(KeyboardVariant::Corrupted),
            "corrupted_backspace" | "backspace" => Ok(KeyboardVariant::CorruptedBackspace),
            _ => Err(()),
        }
    }
}

/// Stateless symbol remapping used by the corrupted keyboards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySymbolTranslator {
    table: KeySubstitutionTable,
}

impl KeySymbolTranslator {
    pub fn new(table: KeySubstitutionTable) -> Self {
        Self { table }
    }

    pub fn for_variant(variant: KeyboardVariant) -> Self {
        Self::new(variant.table())
    }

    pub fn table(&self) -> &KeySubstitutionTable {
        &self.table
    }

    pub fn translate<'a>(&'a self, symbol: &'a str) -> &'a str {
        self.table.get(symbol).unwrap_or(symbol)
    }
}

impl From<KeySubstitutionTable> for KeySymbolTranslator {
    fn from(table: KeySubstitutionTable) -> Self {
        Self::new(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn corrupted_swaps_mirrored_letters() {
        let translator = KeySymbolTranslator::for_variant(KeyboardVariant::Corrupted);
        assert_eq!(translator.translate("q"), "p");
        assert_eq!(translator.translate("p"), "q");
        assert_eq!(translator.translate("A"), "L");
        assert_eq!(translator.translate("n"), "x");
        assert_eq!(translator.table().len(), 52);
        assert!(translator.table().is_symmetric());
    }

    #[test]
    fn unmapped_symbols_pass_through() {
        let translator = KeySymbolTranslator::for_variant(KeyboardVariant::Corrupted);
        for symbol in ["1", "9", "Return", "space", "BackSpace", "comma"] {
            assert_eq!(translator.translate(symbol), symbol);
        }
    }

    #[test]
    fn backspace_variant_only_disables_backspace() {
        let translator = KeySymbolTranslator::for_variant(KeyboardVariant::CorruptedBackspace);
        assert_eq!(translator.translate("BackSpace"), DISABLED_SYMBOL);
        for symbol in ["q", "p", "A", "Return", "Shift_L"] {
            assert_eq!(translator.translate(symbol), symbol);
        }
    }

    #[test]
    fn standard_variant_is_identity() {
        let translator = KeySymbolTranslator::default();
        assert!(translator.table().is_empty());
        assert_eq!(translator.translate("BackSpace"), "BackSpace");
    }

    #[test]
    fn table_round_trips_as_plain_json_object() {
        let table: KeySubstitutionTable =
            serde_json::from_str(r#"{"1": "2", "2": "1"}"#).expect("table should parse");
        let translator = KeySymbolTranslator::from(table);
        assert_eq!(translator.translate("1"), "2");
        assert!(translator.table().is_symmetric());
    }

    #[test]
    fn one_way_entry_is_not_symmetric() {
        let table = KeySubstitutionTable::identity().insert("a", "b");
        assert!(!table.is_symmetric());
    }

    #[test]
    fn variant_names_parse() {
        assert_eq!("Corrupted".parse::<KeyboardVariant>(), Ok(KeyboardVariant::Corrupted));
        assert_eq!("corrupted-backspace".parse::<KeyboardVariant>(), Ok(KeyboardVariant::CorruptedBackspace));
        assert_eq!("normal".parse::<KeyboardVariant>(), Ok(KeyboardVariant::Standard));
        assert_eq!("broken".parse::<KeyboardVariant>(), Err(()));
    }

    proptest! {
        #[test]
        fn corrupted_translation_is_an_involution(symbol in "[a-zA-Z0-9]{1,3}|BackSpace|Return") {
            let translator = KeySymbolTranslator::for_variant(KeyboardVariant::Corrupted);
            let once = translator.translate(&symbol);
            prop_assert_eq!(translator.translate(once), symbol.as_str());
        }
    }
}
