use serde::{Deserialize, Serialize};

pub const STARTING_LIVES: u32 = 8;
/// Side length of the square occupied by a player or enemy sprite.
pub const ACTOR_SIZE: u32 = 50;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The typist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub position: Position,
    lives: u32,
    score: u32,
}

impl Player {
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self {
            name: name.into(),
            position,
            lives: STARTING_LIVES,
            score: 0,
        }
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }

    /// Removes one life. Returns `false` and changes nothing when no lives
    /// are left.
    pub fn take_damage(&mut self) -> bool {
        if self.lives > 0 {
            self.lives -= 1;
            true
        } else {
            false
        }
    }

    pub fn heal(&mut self) {
        self.lives = self.lives.saturating_add(1);
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }
}

/// The opposing "system". Carries no behaviour of its own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Enemy {
    pub name: String,
    pub position: Position,
}

impl Enemy {
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_player_starts_with_full_lives() {
        let player = Player::new("ada", Position::default());
        assert_eq!(player.lives(), STARTING_LIVES);
        assert_eq!(player.score(), 0);
        assert!(player.is_alive());
    }

    #[test]
    fn take_damage_stops_at_zero() {
        let mut player = Player::new("ada", Position::new(10, 20));
        for _ in 0..STARTING_LIVES {
            assert!(player.take_damage());
        }
        assert_eq!(player.lives(), 0);
        assert!(!player.take_damage(), "no damage once lives are gone");
        assert_eq!(player.lives(), 0);
        assert!(!player.is_alive());
    }

    #[test]
    fn take_damage_removes_exactly_one_life() {
        let mut player = Player::new("ada", Position::default());
        assert!(player.take_damage());
        assert_eq!(player.lives(), STARTING_LIVES - 1);
    }

    #[test]
    fn heal_and_score_only_increase() {
        let mut player = Player::new("ada", Position::default());
        player.take_damage();
        player.heal();
        assert_eq!(player.lives(), STARTING_LIVES);

        player.add_score(12);
        player.add_score(u32::MAX);
        assert_eq!(player.score(), u32::MAX);
    }
}
