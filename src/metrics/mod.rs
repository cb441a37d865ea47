pub mod game_metrics;

pub use game_metrics::{GameMetrics, PlayerNameError, ScoreRecord, validate_player_name};
