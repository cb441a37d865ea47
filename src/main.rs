use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::game::{Action, Difficulty, Direction, GameConfig, GameEngine, ReversalPolicy};
use grid_snake::metrics::{GameMetrics, PlayerNameError, ScoreRecord, validate_player_name};
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Headless grid snake simulation")]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<usize>,

    #[arg(long, value_enum)]
    difficulty: Option<Difficulty>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Ignore 180-degree turns instead of letting the snake bite its neck
    #[arg(long)]
    reject_reversal: bool,

    /// Scripted turns, one compass letter (N/S/E/W) per tick; '.' keeps heading
    #[arg(long, default_value = "")]
    moves: String,

    /// Maximum number of ticks to run
    #[arg(long, default_value = "200")]
    ticks: u32,

    /// Milliseconds per tick
    #[arg(long, default_value = "125", value_parser = clap::value_parser!(u64).range(1..))]
    tick_ms: u64,

    /// Player name reported with the final score: a letter, then 2 to 17 letters, digits or '_'
    #[arg(long, default_value = "player", value_parser = parse_player)]
    player: String,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.reject_reversal {
            config.snake.reversal = ReversalPolicy::Reject;
        }

        Ok(config)
    }
}

fn parse_player(name: &str) -> Result<String, PlayerNameError> {
    validate_player_name(name)?;
    Ok(name.to_string())
}

fn parse_moves(script: &str) -> Result<Vec<Action>> {
    script
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '.' => Ok(Action::Continue),
            _ => Direction::from_char(c)
                .map(Action::Turn)
                .with_context(|| format!("Invalid move {:?}, expected one of N S E W .", c)),
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.game_config()?;
    let moves = parse_moves(&cli.moves)?;

    let mut engine = GameEngine::new(config).context("Invalid game configuration")?;
    let mut state = engine.reset();
    let mut metrics = GameMetrics::new();
    metrics.on_game_start();

    info!(
        width = engine.config().grid_width,
        height = engine.config().grid_height,
        difficulty = ?engine.config().difficulty,
        "starting session"
    );

    let mut tick_timer = interval(Duration::from_millis(cli.tick_ms));
    let mut script = moves.into_iter();

    while state.is_alive() && state.ticks < cli.ticks {
        tokio::select! {
            _ = tick_timer.tick() => {
                let action = script.next().unwrap_or(Action::Continue);
                let result = engine.step(&mut state, action);
                metrics.on_step(&result);
            }

            _ = tokio::signal::ctrl_c() => {
                warn!("interrupted");
                break;
            }
        }
    }

    metrics.update();
    metrics.on_game_over(state.snake.score());
    info!(
        ticks = metrics.ticks,
        food = metrics.food_eaten,
        length = state.snake.body_len(),
        alive = state.is_alive(),
        elapsed = %metrics.format_time(),
        "session over"
    );

    let record = ScoreRecord::from_snake(cli.player, &state.snake)
        .context("Invalid player name")?;
    let json = serde_json::to_string(&record).context("Failed to serialize score record")?;
    println!("{json}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_moves() {
        let moves = parse_moves("n. e\nW").unwrap();
        assert_eq!(
            moves,
            vec![
                Action::Turn(Direction::North),
                Action::Continue,
                Action::Turn(Direction::East),
                Action::Turn(Direction::West),
            ]
        );
        assert!(parse_moves("NX").is_err());
    }

    #[test]
    fn test_player_flag_validated() {
        let cli = Cli::parse_from(["grid_snake", "--player", "ada_99"]);
        assert_eq!(cli.player, "ada_99");

        assert!(Cli::try_parse_from(["grid_snake", "--player", ""]).is_err());
        assert!(Cli::try_parse_from(["grid_snake", "--player", "9lives"]).is_err());
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "grid_snake",
            "--width",
            "12",
            "--difficulty",
            "hard",
            "--reject-reversal",
        ]);
        let config = cli.game_config().unwrap();
        assert_eq!(config.grid_width, 12);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.snake.reversal, ReversalPolicy::Reject);
    }
}
