use log::info;
use serde::Serialize;

use crate::keyboard::char_for_symbol;
use crate::phrases::{DifficultyLevel, PhraseManager, QueryError};

use super::state::{Enemy, Player, Position, ACTOR_SIZE};

/// Stage width used when the front end does not specify one.
pub const DEFAULT_STAGE_WIDTH: i32 = 800;

const ERASE_SYMBOL: &str = "BackSpace";
const SUBMIT_SYMBOL: &str = "Return";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum SessionEvent {
    PhraseCompleted { phrase: String, points: u32 },
    PhraseMissed { expected: String, typed: String, lives_left: u32 },
    NewPhrase { phrase: String },
    PlayerDefeated { score: u32 },
}

/// Serializable view of a running session.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub player: Player,
    pub enemy: Enemy,
    pub difficulty: DifficultyLevel,
    pub target: String,
    pub typed: String,
    pub finished: bool,
}

/// One round of play: a player typing phrases of one difficulty against an
/// enemy until their lives run out.
#[derive(Debug)]
pub struct GameSession {
    player: Player,
    enemy: Enemy,
    difficulty: DifficultyLevel,
    phrases: PhraseManager,
    target: String,
    typed: String,
}

impl GameSession {
    pub fn new(
        player: Player,
        enemy: Enemy,
        difficulty: DifficultyLevel,
        mut phrases: PhraseManager,
    ) -> Result<Self, QueryError> {
        let target = phrases.next_phrase(difficulty)?;
        info!("{} starts a {difficulty} session against {}", player.name, enemy.name);
        Ok(Self {
            player,
            enemy,
            difficulty,
            phrases,
            target,
            typed: String::new(),
        })
    }

    /// Session with the player on the left and the enemy on the right of a
    /// `width`-wide stage.
    pub fn with_names(
        player_name: &str,
        enemy_name: &str,
        difficulty: DifficultyLevel,
        phrases: PhraseManager,
        width: i32,
    ) -> Result<Self, QueryError> {
        let right = width.saturating_sub(ACTOR_SIZE as i32).max(0);
        Self::new(
            Player::new(player_name, Position::new(0, 0)),
            Enemy::new(enemy_name, Position::new(right, 0)),
            difficulty,
            phrases,
        )
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn difficulty(&self) -> DifficultyLevel {
        self.difficulty
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    /// The phrase source, shared with any out-of-session phrase queries so
    /// they follow the same cycles.
    pub fn phrases_mut(&mut self) -> &mut PhraseManager {
        &mut self.phrases
    }

    pub fn is_over(&self) -> bool {
        !self.player.is_alive()
    }

    /// Feeds one already-translated key symbol into the typing buffer.
    /// Symbols that type nothing (modifiers, disabled keys) are ignored.
    pub fn type_symbol(&mut self, symbol: &str) -> Result<Vec<SessionEvent>, QueryError> {
        if self.is_over() {
            return Ok(Vec::new());
        }
        match symbol {
            ERASE_SYMBOL => {
                self.typed.pop();
            }
            SUBMIT_SYMBOL => return self.submit(),
            _ => {
                if let Some(ch) = char_for_symbol(symbol) {
                    self.typed.push(ch);
                }
            }
        }
        Ok(Vec::new())
    }

    /// Checks the typed buffer against the target phrase. A match scores one
    /// point per character and moves on to a new phrase; a miss costs a life
    /// and the same phrase must be typed again.
    pub fn submit(&mut self) -> Result<Vec<SessionEvent>, QueryError> {
        let mut events = Vec::new();
        if self.is_over() {
            return Ok(events);
        }

        let typed = std::mem::take(&mut self.typed);
        if typed == self.target {
            let points = self.target.chars().count() as u32;
            self.player.add_score(points);
            events.push(SessionEvent::PhraseCompleted {
                phrase: typed,
                points,
            });

            self.target = self.phrases.next_phrase(self.difficulty)?;
            events.push(SessionEvent::NewPhrase {
                phrase: self.target.clone(),
            });
        } else {
            self.player.take_damage();
            events.push(SessionEvent::PhraseMissed {
                expected: self.target.clone(),
                typed,
                lives_left: self.player.lives(),
            });
            if self.is_over() {
                info!("{} defeated with {} points", self.player.name, self.player.score());
                events.push(SessionEvent::PlayerDefeated {
                    score: self.player.score(),
                });
            }
        }
        Ok(events)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            player: self.player.clone(),
            enemy: self.enemy.clone(),
            difficulty: self.difficulty,
            target: self.target.clone(),
            typed: self.typed.clone(),
            finished: self.is_over(),
        }
    }
}
