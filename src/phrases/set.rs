use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::manager::QueryError;

/// Difficulty tier that selects which phrase list is drawn from. Written
/// uppercase, read in any case.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum DifficultyLevel {
    Easy,
    Medium,
    Hard,
}

impl DifficultyLevel {
    pub const ALL: [DifficultyLevel; 3] = [
        DifficultyLevel::Easy,
        DifficultyLevel::Medium,
        DifficultyLevel::Hard,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DifficultyLevel::Easy => "EASY",
            DifficultyLevel::Medium => "MEDIUM",
            DifficultyLevel::Hard => "HARD",
        }
    }

    /// Name of the phrase file for this level inside the phrase directory.
    pub fn file_name(self) -> &'static str {
        match self {
            DifficultyLevel::Easy => "easy_phrases.txt",
            DifficultyLevel::Medium => "medium_phrases.txt",
            DifficultyLevel::Hard => "hard_phrases.txt",
        }
    }
}

impl Default for DifficultyLevel {
    fn default() -> Self {
        DifficultyLevel::Easy
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DifficultyLevel {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "EASY" => Ok(DifficultyLevel::Easy),
            "MEDIUM" => Ok(DifficultyLevel::Medium),
            "HARD" => Ok(DifficultyLevel::Hard),
            _ => Err(QueryError::UnknownLevel {
                level: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for DifficultyLevel {
    type Error = QueryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Error, Serialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum PhraseFileReason {
    #[error("file not found")]
    Missing,
    #[error("unreadable: {message}")]
    Unreadable { message: String },
    #[error("not valid UTF-8")]
    InvalidUtf8,
}

/// A phrase file for one level could not be loaded.
#[derive(Debug, Clone, Error, Serialize, PartialEq, Eq)]
#[error("cannot load {level} phrases from {path}: {reason}")]
pub struct PhraseFileError {
    pub level: DifficultyLevel,
    pub path: String,
    pub reason: PhraseFileReason,
}

impl PhraseFileError {
    fn new(level: DifficultyLevel, path: &Path, reason: PhraseFileReason) -> Self {
        Self {
            level,
            path: path.display().to_string(),
            reason,
        }
    }
}

/// Phrases of one difficulty level, in file order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct PhraseSet {
    phrases: Vec<String>,
}

impl PhraseSet {
    /// Parses phrase-file text: one phrase per line, surrounding whitespace
    /// trimmed, blank lines and `#` comment lines skipped.
    pub fn parse(text: &str) -> Self {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        Self::from_phrases(text.lines())
    }

    /// Builds a set from individual lines, applying the same filtering as
    /// [`PhraseSet::parse`].
    pub fn from_phrases<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases = lines
            .into_iter()
            .filter_map(|line| {
                let trimmed = line.as_ref().trim();
                if trimmed.is_empty() || trimmed.starts_with('#') {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect();
        Self { phrases }
    }

    pub fn load(level: DifficultyLevel, path: impl AsRef<Path>) -> Result<Self, PhraseFileError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|error| {
            let reason = match error.kind() {
                io::ErrorKind::NotFound => PhraseFileReason::Missing,
                _ => PhraseFileReason::Unreadable {
                    message: error.to_string(),
                },
            };
            PhraseFileError::new(level, path, reason)
        })?;
        let text = String::from_utf8(bytes)
            .map_err(|_| PhraseFileError::new(level, path, PhraseFileReason::InvalidUtf8))?;
        Ok(Self::parse(&text))
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.phrases.iter().any(|candidate| candidate == phrase)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.phrases.iter().map(String::as_str)
    }

    /// Number of different phrases; duplicate lines count once.
    pub fn distinct_len(&self) -> usize {
        self.iter().collect::<HashSet<_>>().len()
    }
}
