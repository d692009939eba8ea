//! Difficulty-tiered phrase lists and non-repeating random selection.

pub mod manager;
pub mod set;

pub use manager::{PhraseManager, QueryError, NO_PHRASE_FOUND};
pub use set::{DifficultyLevel, PhraseFileError, PhraseFileReason, PhraseSet};
