//! Power-ups that mutate a snake through [`Snake::add_buffer`].
//!
//! A buffer only sees the snake's public mutators, so any variant can be
//! added without the snake knowing about it.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::snake::Snake;

/// Difficulty level; scales the magnitude of buffer effects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn multiplier(&self) -> i64 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Normal => 2,
            Difficulty::Hard => 3,
        }
    }
}

pub trait Buffer {
    /// Apply this buffer's effect to `snake`
    fn apply_to(&self, snake: &mut Snake, difficulty: Difficulty);

    fn name(&self) -> &str;
}

/// Food pickup: grows the snake and awards points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub growth: u32,
    pub points: i64,
}

impl Buffer for Food {
    fn apply_to(&self, snake: &mut Snake, difficulty: Difficulty) {
        snake.gains(self.growth);
        snake.add_score(self.points.saturating_mul(difficulty.multiplier()));
    }

    fn name(&self) -> &str {
        "food"
    }
}

/// Flat bonus, independent of difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBonus {
    pub points: i64,
}

impl Buffer for ScoreBonus {
    fn apply_to(&self, snake: &mut Snake, _difficulty: Difficulty) {
        snake.add_score(self.points);
    }

    fn name(&self) -> &str {
        "score bonus"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Penalty {
    pub points: i64,
}

impl Buffer for Penalty {
    fn apply_to(&self, snake: &mut Snake, difficulty: Difficulty) {
        snake.add_score(
            self.points
                .saturating_mul(difficulty.multiplier())
                .saturating_neg(),
        );
    }

    fn name(&self) -> &str {
        "penalty"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_multiplier() {
        assert_eq!(Difficulty::Easy.multiplier(), 1);
        assert_eq!(Difficulty::Normal.multiplier(), 2);
        assert_eq!(Difficulty::Hard.multiplier(), 3);
    }

    #[test]
    fn test_buffers_as_trait_objects() {
        let buffers: Vec<Box<dyn Buffer>> = vec![
            Box::new(Food {
                growth: 3,
                points: 5,
            }),
            Box::new(ScoreBonus { points: 7 }),
            Box::new(Penalty { points: 1 }),
        ];

        let mut snake = Snake::new(0);
        for buffer in &buffers {
            snake.add_buffer(buffer.as_ref(), Difficulty::Normal);
        }

        // 5*2 + 7 - 1*2
        assert_eq!(snake.score(), 15);
        assert_eq!(snake.pending_growth(), 3);
        assert_eq!(buffers[1].name(), "score bonus");
    }

    #[test]
    fn test_extreme_points_saturate() {
        let mut snake = Snake::new(0);
        snake.add_buffer(
            &Food {
                growth: 1,
                points: i64::MAX,
            },
            Difficulty::Hard,
        );
        assert_eq!(snake.score(), i64::MAX);

        let mut snake = Snake::new(0);
        snake.add_buffer(&Penalty { points: i64::MAX }, Difficulty::Hard);
        assert_eq!(snake.score(), -i64::MAX);
        snake.add_buffer(&Penalty { points: i64::MIN }, Difficulty::Normal);
        assert_eq!(snake.score(), 0);
    }

    #[test]
    fn test_custom_buffer() {
        struct Stretch;

        impl Buffer for Stretch {
            fn apply_to(&self, snake: &mut Snake, difficulty: Difficulty) {
                snake.gains(difficulty.multiplier() as u32);
            }

            fn name(&self) -> &str {
                "stretch"
            }
        }

        let mut snake = Snake::new(0);
        snake.add_buffer(&Stretch, Difficulty::Hard);
        assert_eq!(snake.pending_growth(), 3);
        snake.step();
        assert_eq!(snake.body_len(), 4);
    }
}
