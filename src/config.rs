//! Game settings loaded from JSON.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::{GameSession, DEFAULT_STAGE_WIDTH};
use crate::keyboard::{InputDispatcher, KeySubstitutionTable, KeySymbolTranslator, KeyboardVariant};
use crate::phrases::{DifficultyLevel, PhraseManager, QueryError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid game config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GameConfig {
    pub phrase_dir: PathBuf,
    pub difficulty: DifficultyLevel,
    pub keyboard: KeyboardVariant,
    /// Replaces the variant's table when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substitutions: Option<KeySubstitutionTable>,
    pub player_name: String,
    pub enemy_name: String,
    pub stage_width: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            phrase_dir: PathBuf::from("data"),
            difficulty: DifficultyLevel::default(),
            keyboard: KeyboardVariant::default(),
            substitutions: None,
            player_name: "Player".to_string(),
            enemy_name: "System".to_string(),
            stage_width: DEFAULT_STAGE_WIDTH,
        }
    }
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_keyboard(mut self, keyboard: KeyboardVariant) -> Self {
        self.keyboard = keyboard;
        self
    }

    pub fn translator(&self) -> KeySymbolTranslator {
        match &self.substitutions {
            Some(table) => KeySymbolTranslator::new(table.clone()),
            None => KeySymbolTranslator::for_variant(self.keyboard),
        }
    }

    pub fn dispatcher(&self) -> InputDispatcher {
        InputDispatcher::new(self.translator())
    }

    /// Loads the phrase files from `phrase_dir`.
    pub fn phrase_manager(&self) -> PhraseManager {
        PhraseManager::load(&self.phrase_dir)
    }

    pub fn start_session(&self, phrases: PhraseManager) -> Result<GameSession, QueryError> {
        GameSession::with_names(
            &self.player_name,
            &self.enemy_name,
            self.difficulty,
            phrases,
            self.stage_width,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let config = GameConfig::from_json("{}").expect("config should parse");
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.phrase_dir, PathBuf::from("data"));
        assert_eq!(config.translator().translate("q"), "q");
    }

    #[test]
    fn variant_and_difficulty_are_read() {
        let config = GameConfig::from_json(
            r#"{"difficulty": "HARD", "keyboard": "corrupted_backspace", "player_name": "ada"}"#,
        )
        .expect("config should parse");
        assert_eq!(config.difficulty, DifficultyLevel::Hard);
        assert_eq!(config.keyboard, KeyboardVariant::CorruptedBackspace);
        assert_eq!(config.player_name, "ada");
        assert_eq!(
            config.translator().translate("BackSpace"),
            crate::keyboard::DISABLED_SYMBOL
        );
    }

    #[test]
    fn difficulty_is_read_in_any_case() {
        let config = GameConfig::from_json(r#"{"difficulty": "hard"}"#).expect("config should parse");
        assert_eq!(config.difficulty, DifficultyLevel::Hard);

        let error = GameConfig::from_json(r#"{"difficulty": "nightmare"}"#).expect_err("should fail");
        assert!(matches!(error, ConfigError::Parse(_)));
    }

    #[test]
    fn substitutions_override_the_variant() {
        let config = GameConfig::from_json(
            r#"{"keyboard": "corrupted", "substitutions": {"1": "0", "0": "1"}}"#,
        )
        .expect("config should parse");
        let translator = config.translator();
        assert_eq!(translator.translate("1"), "0");
        assert_eq!(translator.translate("q"), "q");
    }

    #[test]
    fn bad_json_is_reported() {
        let error = GameConfig::from_json(r#"{"keyboard": "melted"}"#).expect_err("should fail");
        assert!(matches!(error, ConfigError::Parse(_)));
        assert!(error.to_string().starts_with("invalid game config"));
    }

    #[test]
    fn session_starts_from_config_and_phrase_dir() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(dir.path().join("easy_phrases.txt"), "# warm up\nhello\n").expect("write");

        let config = GameConfig {
            phrase_dir: dir.path().to_path_buf(),
            ..GameConfig::default()
        }
        .with_keyboard(KeyboardVariant::Corrupted);

        let session = config
            .start_session(config.phrase_manager())
            .expect("session should start");
        assert_eq!(session.target(), "hello");
        assert_eq!(session.player().name, "Player");
        assert_eq!(config.dispatcher().translator().translate("a"), "l");
    }
}
