pub mod config;
pub mod game;
pub mod keyboard;
pub mod phrases;

use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;
use web_sys::js_sys::Function;

pub use config::{ConfigError, GameConfig};
pub use game::{
    Enemy, GameSession, Player, Position, SessionEvent, SessionSnapshot, STARTING_LIVES,
};
pub use keyboard::{
    InputDispatcher, Key, KeyDispatch, KeyEventKind, KeyRenderer, KeyState,
    KeySubstitutionTable, KeySymbolTranslator, KeyboardLayout, KeyboardVariant, DISABLED_SYMBOL,
};
pub use phrases::{
    DifficultyLevel, PhraseFileError, PhraseManager, PhraseSet, QueryError, NO_PHRASE_FOUND,
};

#[cfg(all(feature = "wee_alloc", target_arch = "wasm32"))]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn start() {
    set_panic_hook();
    init_logging();
}

fn to_js_error<E: Serialize + Display>(error: E) -> JsValue {
    to_value(&error).unwrap_or_else(|_| JsValue::from_str(&error.to_string()))
}

fn display_to_js_error<E: Display>(error: E) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn parse_variant(variant: &str) -> Result<KeyboardVariant, JsValue> {
    KeyboardVariant::from_str(variant)
        .map_err(|_| JsValue::from_str(&format!("unknown keyboard variant '{variant}'")))
}

/// Forwards key highlights to a JS callback `(keySymbol, state)`.
struct CallbackRenderer<'a> {
    callback: Option<&'a Function>,
}

impl KeyRenderer for CallbackRenderer<'_> {
    fn update_key(&mut self, key: Key, state: KeyState) {
        let Some(callback) = self.callback else {
            return;
        };
        let state = match state {
            KeyState::Pressed => "pressed",
            KeyState::Released => "released",
        };
        if let Err(error) = callback.call2(
            &JsValue::NULL,
            &JsValue::from_str(key.symbol()),
            &JsValue::from_str(state),
        ) {
            log::warn!("key renderer callback failed: {error:?}");
        }
    }
}

#[derive(Serialize)]
struct KeyPressResponse {
    #[serde(flatten)]
    dispatch: KeyDispatch,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    events: Vec<SessionEvent>,
}

#[wasm_bindgen]
pub struct TypingEngine {
    session: GameSession,
    dispatcher: InputDispatcher,
    renderer: Option<Function>,
}

#[wasm_bindgen]
impl TypingEngine {
    /// `phrases_json` maps level names to phrase-file text, e.g.
    /// `{"EASY": "one\ntwo", "HARD": "..."}`.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>, phrases_json: &str) -> Result<TypingEngine, JsValue> {
        let config = match config_json {
            Some(json) => GameConfig::from_json(&json).map_err(display_to_js_error)?,
            None => GameConfig::default(),
        };
        let texts: HashMap<DifficultyLevel, String> =
            serde_json::from_str(phrases_json).map_err(display_to_js_error)?;
        let phrases = PhraseManager::from_sets(
            texts
                .into_iter()
                .map(|(level, text)| (level, PhraseSet::parse(&text))),
        );

        let session = config.start_session(phrases).map_err(to_js_error)?;
        Ok(TypingEngine {
            session,
            dispatcher: config.dispatcher(),
            renderer: None,
        })
    }

    /// Registers `callback(keySymbol, "pressed" | "released")`.
    pub fn set_renderer(&mut self, callback: Function) {
        self.renderer = Some(callback);
    }

    pub fn random_phrase(&mut self, difficulty: &str) -> String {
        self.session.phrases_mut().random_phrase(difficulty)
    }

    pub fn translate(&self, symbol: &str) -> String {
        self.dispatcher.translator().translate(symbol).to_string()
    }

    pub fn target(&self) -> String {
        self.session.target().to_string()
    }

    pub fn key_press(&mut self, symbol: &str) -> Result<String, JsValue> {
        let mut renderer = CallbackRenderer {
            callback: self.renderer.as_ref(),
        };
        let dispatch = self.dispatcher.press(symbol, &mut renderer);
        let events = self
            .session
            .type_symbol(&dispatch.translated)
            .map_err(to_js_error)?;
        serde_json::to_string(&KeyPressResponse { dispatch, events }).map_err(display_to_js_error)
    }

    pub fn key_release(&mut self, symbol: &str) -> Result<String, JsValue> {
        let mut renderer = CallbackRenderer {
            callback: self.renderer.as_ref(),
        };
        let dispatch = self.dispatcher.release(symbol, &mut renderer);
        serde_json::to_string(&dispatch).map_err(display_to_js_error)
    }

    pub fn submit(&mut self) -> Result<String, JsValue> {
        let events = self.session.submit().map_err(to_js_error)?;
        serde_json::to_string(&events).map_err(display_to_js_error)
    }

    pub fn session_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.snapshot()).map_err(display_to_js_error)
    }
}

/// Parses phrase-file text into the list of phrases it contains.
#[wasm_bindgen(js_name = "parsePhrases")]
pub fn parse_phrases(text: &str) -> Result<JsValue, JsValue> {
    to_value(&PhraseSet::parse(text)).map_err(JsValue::from)
}

#[wasm_bindgen(js_name = "translateSymbol")]
pub fn translate_symbol(variant: &str, symbol: &str) -> Result<String, JsValue> {
    let translator = KeySymbolTranslator::for_variant(parse_variant(variant)?);
    Ok(translator.translate(symbol).to_string())
}

#[wasm_bindgen(js_name = "substitutionTable")]
pub fn substitution_table(variant: &str) -> Result<JsValue, JsValue> {
    to_value(&parse_variant(variant)?.table()).map_err(JsValue::from)
}

/// Whether a custom table only contains swaps (plus disabled keys).
#[wasm_bindgen(js_name = "isSymmetricTable")]
pub fn is_symmetric_table(table: JsValue) -> Result<bool, JsValue> {
    let table: KeySubstitutionTable = from_value(table).map_err(JsValue::from)?;
    Ok(table.is_symmetric())
}

#[cfg(feature = "console_error_panic_hook")]
fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

#[cfg(not(feature = "console_error_panic_hook"))]
fn set_panic_hook() {}

#[cfg(target_arch = "wasm32")]
fn init_logging() {
    if console_log::init_with_level(log::Level::Debug).is_err() {
        log::debug!("logger already installed");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn init_logging() {}
