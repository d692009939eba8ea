use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};

use super::layout::{Key, KeyboardLayout};
use super::translator::KeySymbolTranslator;

const LEFT_SHIFT: &str = "Shift_L";
const RIGHT_SHIFT: &str = "Shift_R";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum KeyEventKind {
    Press,
    Release,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum KeyState {
    Pressed,
    Released,
}

/// The keyboard widget that draws key feedback.
pub trait KeyRenderer {
    fn update_key(&mut self, key: Key, state: KeyState);
}

/// Outcome of one key event.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct KeyDispatch {
    pub original: String,
    /// Symbol to feed into the typing logic.
    pub translated: String,
    /// Key that was highlighted, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<Key>,
}

/// Turns raw key events into translated symbols and key highlights.
#[derive(Debug, Clone)]
pub struct InputDispatcher {
    translator: KeySymbolTranslator,
    layout: &'static KeyboardLayout,
    held: HashSet<String>,
}

impl InputDispatcher {
    pub fn new(translator: KeySymbolTranslator) -> Self {
        Self {
            translator,
            layout: KeyboardLayout::qwerty(),
            held: HashSet::new(),
        }
    }

    pub fn translator(&self) -> &KeySymbolTranslator {
        &self.translator
    }

    pub fn held_symbols(&self) -> &HashSet<String> {
        &self.held
    }

    pub fn dispatch<R: KeyRenderer>(
        &mut self,
        symbol: &str,
        kind: KeyEventKind,
        renderer: &mut R,
    ) -> KeyDispatch {
        match kind {
            KeyEventKind::Press => self.press(symbol, renderer),
            KeyEventKind::Release => self.release(symbol, renderer),
        }
    }

    pub fn press<R: KeyRenderer>(&mut self, symbol: &str, renderer: &mut R) -> KeyDispatch {
        self.held.insert(symbol.to_string());
        self.emit(symbol, symbol, KeyState::Pressed, renderer)
    }

    pub fn release<R: KeyRenderer>(&mut self, symbol: &str, renderer: &mut R) -> KeyDispatch {
        let held = self.repair_shift(symbol);
        self.held.remove(&held);
        self.emit(symbol, &held, KeyState::Released, renderer)
    }

    // Some platforms report the release of either Shift under one keysym;
    // release whichever Shift is actually held.
    fn repair_shift(&self, symbol: &str) -> String {
        if self.held.contains(symbol) || !symbol.contains("Shift") {
            return symbol.to_string();
        }
        [LEFT_SHIFT, RIGHT_SHIFT]
            .into_iter()
            .find(|shift| self.held.contains(*shift))
            .unwrap_or(symbol)
            .to_string()
    }

    fn emit<R: KeyRenderer>(
        &self,
        original: &str,
        effective: &str,
        state: KeyState,
        renderer: &mut R,
    ) -> KeyDispatch {
        let translated = self.translator.translate(original);
        let key = if effective == LEFT_SHIFT || effective == RIGHT_SHIFT {
            self.layout.resolve(effective)
        } else {
            self.layout
                .resolve(translated)
                .or_else(|| self.layout.resolve(effective))
        };

        if let Some(key) = key {
            renderer.update_key(key, state);
        }
        debug!("{state:?} {original} -> {translated} ({key:?})");

        KeyDispatch {
            original: original.to_string(),
            translated: translated.to_string(),
            key,
        }
    }
}
