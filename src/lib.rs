//! Grid Snake - the simulation core of a grid-based snake game
//!
//! This library provides:
//! - The snake state machine and its tile/direction value types (game module)
//! - Power-up hooks through the `Buffer` trait
//! - A headless tick driver with walls and food (game::engine)
//! - Session metrics and the score record handed to a leaderboard (metrics module)

pub mod game;
pub mod metrics;
