use std::collections::{HashMap, HashSet};
use std::path::Path;

use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use thiserror::Error;

use super::set::{DifficultyLevel, PhraseFileError, PhraseSet};

/// Returned by [`PhraseManager::random_phrase`] when there is nothing to offer.
pub const NO_PHRASE_FOUND: &str = "No phrase was found";

#[derive(Debug, Clone, Error, Serialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum QueryError {
    #[error("unknown difficulty level '{level}'")]
    UnknownLevel { level: String },
    #[error("no phrases available for {level}")]
    EmptySet { level: DifficultyLevel },
}

#[derive(Debug, Default)]
struct LevelPool {
    phrases: PhraseSet,
    distinct: usize,
    // Phrases handed out since the last reset. Always a subset of `phrases`.
    used: HashSet<String>,
}

impl LevelPool {
    fn new(phrases: PhraseSet) -> Self {
        let distinct = phrases.distinct_len();
        Self {
            phrases,
            distinct,
            used: HashSet::new(),
        }
    }
}

/// Serves random phrases per difficulty level without repeating a phrase
/// until every phrase of that level has been shown once.
#[derive(Debug)]
pub struct PhraseManager {
    pools: HashMap<DifficultyLevel, LevelPool>,
    load_errors: Vec<PhraseFileError>,
    rng: SmallRng,
}

impl PhraseManager {
    /// Loads `easy_phrases.txt`, `medium_phrases.txt` and `hard_phrases.txt`
    /// from `base_dir`. A level whose file cannot be read stays empty and the
    /// failure is kept in [`PhraseManager::load_errors`]; the other levels are
    /// unaffected.
    pub fn load(base_dir: impl AsRef<Path>) -> Self {
        let base_dir = base_dir.as_ref();
        let mut sets = Vec::with_capacity(DifficultyLevel::ALL.len());
        let mut load_errors = Vec::new();

        for level in DifficultyLevel::ALL {
            let path = base_dir.join(level.file_name());
            match PhraseSet::load(level, &path) {
                Ok(set) => {
                    info!("loaded {} {} phrases from {}", set.len(), level, path.display());
                    sets.push((level, set));
                }
                Err(error) => {
                    warn!("{error}");
                    load_errors.push(error);
                }
            }
        }

        let mut manager = Self::from_sets(sets);
        manager.load_errors = load_errors;
        manager
    }

    /// Builds a manager from sets already in memory. Levels that are not
    /// supplied are treated as empty.
    pub fn from_sets<I>(sets: I) -> Self
    where
        I: IntoIterator<Item = (DifficultyLevel, PhraseSet)>,
    {
        let mut pools: HashMap<DifficultyLevel, LevelPool> = DifficultyLevel::ALL
            .into_iter()
            .map(|level| (level, LevelPool::default()))
            .collect();
        for (level, set) in sets {
            pools.insert(level, LevelPool::new(set));
        }

        Self {
            pools,
            load_errors: Vec::new(),
            rng: SmallRng::from_entropy(),
        }
    }

    /// Replaces the random source with a deterministic one.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    pub fn load_errors(&self) -> &[PhraseFileError] {
        &self.load_errors
    }

    /// Random phrase for `difficulty` (case-insensitive), or
    /// [`NO_PHRASE_FOUND`] when the level is unknown or has no phrases.
    pub fn random_phrase(&mut self, difficulty: &str) -> String {
        self.try_random_phrase(difficulty).unwrap_or_else(|error| {
            debug!("{error}, returning sentinel");
            NO_PHRASE_FOUND.to_string()
        })
    }

    pub fn try_random_phrase(&mut self, difficulty: &str) -> Result<String, QueryError> {
        let level: DifficultyLevel = difficulty.parse()?;
        self.next_phrase(level)
    }

    pub fn next_phrase(&mut self, level: DifficultyLevel) -> Result<String, QueryError> {
        let pool = self
            .pools
            .get_mut(&level)
            .filter(|pool| !pool.phrases.is_empty())
            .ok_or(QueryError::EmptySet { level })?;

        if pool.used.len() >= pool.distinct {
            debug!("{level} phrase cycle exhausted after {} phrases", pool.used.len());
            pool.used.clear();
        }

        let mut seen = HashSet::new();
        let candidates: Vec<&str> = pool
            .phrases
            .iter()
            .filter(|phrase| !pool.used.contains(*phrase) && seen.insert(*phrase))
            .collect();

        let chosen = candidates
            .choose(&mut self.rng)
            .map(|phrase| phrase.to_string())
            .ok_or(QueryError::EmptySet { level })?;

        pool.used.insert(chosen.clone());
        debug!(
            "picked {level} phrase ({}/{} used)",
            pool.used.len(),
            pool.distinct
        );
        Ok(chosen)
    }

    pub fn phrase_count(&self, level: DifficultyLevel) -> usize {
        self.pools.get(&level).map_or(0, |pool| pool.phrases.len())
    }

    pub fn used_count(&self, level: DifficultyLevel) -> usize {
        self.pools.get(&level).map_or(0, |pool| pool.used.len())
    }

    pub fn phrases(&self, level: DifficultyLevel) -> Option<&PhraseSet> {
        self.pools.get(&level).map(|pool| &pool.phrases)
    }

    /// Starts a fresh cycle for `level`.
    pub fn reset(&mut self, level: DifficultyLevel) {
        if let Some(pool) = self.pools.get_mut(&level) {
            pool.used.clear();
        }
    }
}
