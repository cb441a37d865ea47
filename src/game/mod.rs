//! Core game logic module for Snake
//!
//! The snake state machine and its value types carry no I/O or rendering
//! dependencies. `engine` adds a bounded board and food so the snake can be
//! driven headless.

pub mod action;
pub mod buffer;
pub mod config;
pub mod engine;
pub mod snake;
pub mod tile;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use buffer::{Buffer, Difficulty, Food, Penalty, ScoreBonus};
pub use config::{ConfigError, GameConfig, ReversalPolicy, SnakeConfig};
pub use engine::{CollisionType, GameEngine, GameState, StepInfo, StepResult};
pub use snake::Snake;
pub use tile::Tile;
