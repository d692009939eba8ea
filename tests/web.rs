//! Browser tests for the JS-facing surface. Run with `wasm-pack test`.

#![cfg(target_arch = "wasm32")]

use typing_core::{translate_symbol, TypingEngine, NO_PHRASE_FOUND};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const PHRASES: &str = r##"{"EASY": "# easy\nab\n", "MEDIUM": "first\nsecond\n"}"##;

fn engine(config: &str) -> TypingEngine {
    TypingEngine::new(Some(config.to_string()), PHRASES).expect("engine should start")
}

#[wasm_bindgen_test]
fn corrupted_engine_translates_keys() {
    let engine = engine(r#"{"keyboard": "corrupted"}"#);
    assert_eq!(engine.translate("q"), "p");
    assert_eq!(engine.translate("Return"), "Return");
}

#[wasm_bindgen_test]
fn typing_through_the_engine_completes_a_phrase() {
    let mut engine = engine("{}");
    assert_eq!(engine.target(), "ab");

    engine.key_press("a").expect("press");
    engine.key_release("a").expect("release");
    engine.key_press("b").expect("press");
    let response = engine.key_press("Return").expect("submit");

    assert!(response.contains("PhraseCompleted"));
    let session = engine.session_json().expect("snapshot");
    assert!(session.contains("\"score\":2"));
}

#[wasm_bindgen_test]
fn unknown_level_yields_sentinel() {
    let mut engine = engine("{}");
    assert_eq!(engine.random_phrase("legendary"), NO_PHRASE_FOUND);
    assert_eq!(engine.random_phrase("hard"), NO_PHRASE_FOUND);
}

#[wasm_bindgen_test]
fn free_translate_rejects_unknown_variant() {
    assert_eq!(translate_symbol("backspace", "BackSpace").expect("variant"), "<disabled>");
    assert!(translate_symbol("melted", "q").is_err());
}
