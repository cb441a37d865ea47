use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::game::{Snake, StepResult};

const PLAYER_NAME_MIN: usize = 3;
const PLAYER_NAME_MAX: usize = 18;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayerNameError {
    #[error("player name must be 3 to 18 characters, got {0}")]
    Length(usize),
    #[error("player name must start with a letter, got {0:?}")]
    FirstCharacter(char),
    #[error("player name may only contain letters, digits and '_', got {0:?}")]
    Character(char),
}

/// Check a leaderboard name: a letter followed by 2 to 17 letters, digits or underscores
pub fn validate_player_name(name: &str) -> Result<(), PlayerNameError> {
    let length = name.chars().count();
    if !(PLAYER_NAME_MIN..=PLAYER_NAME_MAX).contains(&length) {
        return Err(PlayerNameError::Length(length));
    }

    let mut chars = name.chars();
    if let Some(first) = chars.next().filter(|c| !c.is_ascii_alphabetic()) {
        return Err(PlayerNameError::FirstCharacter(first));
    }
    match chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        Some(bad) => Err(PlayerNameError::Character(bad)),
        None => Ok(()),
    }
}

/// Final result handed to the leaderboard at the end of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub player: String,
    pub score: i64,
}

impl ScoreRecord {
    pub fn new(player: impl Into<String>, score: i64) -> Result<Self, PlayerNameError> {
        let player = player.into();
        validate_player_name(&player)?;
        Ok(Self { player, score })
    }

    pub fn from_snake(player: impl Into<String>, snake: &Snake) -> Result<Self, PlayerNameError> {
        Self::new(player, snake.score())
    }
}

pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub ticks: u32,
    pub food_eaten: u32,
    pub high_score: Option<i64>,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            ticks: 0,
            food_eaten: 0,
            high_score: None,
            games_played: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.ticks = 0;
        self.food_eaten = 0;
    }

    /// Record the outcome of one engine step
    pub fn on_step(&mut self, result: &StepResult) {
        if result.info.collision_type.is_some() || !result.terminated {
            self.ticks += 1;
        }
        if result.info.ate_food {
            self.food_eaten += 1;
        }
    }

    pub fn on_game_over(&mut self, final_score: i64) {
        self.games_played += 1;
        if self.high_score.is_none_or(|best| final_score > best) {
            self.high_score = Some(final_score);
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
