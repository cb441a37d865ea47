use rand::{Rng, SeedableRng, rngs::StdRng, seq::IteratorRandom};
use tracing::{debug, info};

use super::{
    action::Action,
    buffer::{Buffer, Food},
    config::{ConfigError, GameConfig},
    snake::Snake,
    tile::Tile,
};

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the board
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game has terminated
    pub terminated: bool,
    pub info: StepInfo,
}

/// Complete state of one game session
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// Current food tile; `None` once the snake covers the whole board
    pub food: Option<Tile>,
    pub ticks: u32,
}

impl GameState {
    pub fn is_alive(&self) -> bool {
        self.snake.is_alive()
    }
}

/// Random cells tried before falling back to a full board scan
const SPAWN_ATTEMPTS: usize = 64;

/// Drives a snake around a bounded board, one tick per `step`
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reset the game to initial state
    pub fn reset(&mut self) -> GameState {
        // Config was validated in `new`, so the snake layout is valid
        let snake = Snake::with_config(&self.config.snake, 0).unwrap_or_default();
        let food = self.spawn_food_avoid_snake(&snake);

        GameState {
            snake,
            food,
            ticks: 0,
        }
    }

    /// Execute one tick of the game
    pub fn step(&mut self, state: &mut GameState, action: Action) -> StepResult {
        if !state.snake.is_alive() {
            return StepResult {
                terminated: true,
                info: StepInfo {
                    ate_food: false,
                    collision_type: None,
                },
            };
        }

        if let Action::Turn(direction) = action {
            state.snake.set_direction(direction);
        }

        state.snake.step();
        state.ticks += 1;

        let head = state.snake.head();
        debug!(tick = state.ticks, x = head.x(), y = head.y(), "snake moved");

        let collision_type = if !self.is_in_bounds(head) {
            state.snake.set_alive(false);
            Some(CollisionType::Wall)
        } else if !state.snake.is_alive() {
            Some(CollisionType::SelfCollision)
        } else {
            None
        };

        if let Some(collision) = collision_type {
            info!(
                tick = state.ticks,
                score = state.snake.score(),
                ?collision,
                "snake died"
            );
            return StepResult {
                terminated: true,
                info: StepInfo {
                    ate_food: false,
                    collision_type,
                },
            };
        }

        let ate_food = state.food == Some(head);
        if ate_food {
            let food = Food {
                growth: self.config.food_growth,
                points: self.config.food_points,
            };
            state.snake.add_buffer(&food, self.config.difficulty);
            state.food = self.spawn_food_avoid_snake(&state.snake);
            info!(
                tick = state.ticks,
                score = state.snake.score(),
                length = state.snake.body_len(),
                buffer = food.name(),
                "food eaten"
            );
        }

        StepResult {
            terminated: false,
            info: StepInfo {
                ate_food,
                collision_type: None,
            },
        }
    }

    /// Check if a tile lies on the board
    pub fn is_in_bounds(&self, tile: Tile) -> bool {
        let (col, row) = tile.cell(self.config.snake.grid_unit);
        col >= 0
            && (col as i64) < self.config.grid_width as i64
            && row >= 0
            && (row as i64) < self.config.grid_height as i64
    }

    /// Pick a random free tile
    fn spawn_food_avoid_snake(&mut self, snake: &Snake) -> Option<Tile> {
        let unit = self.config.snake.grid_unit;
        // Validated to fit in i32
        let width = self.config.grid_width as i32;
        let height = self.config.grid_height as i32;

        for _ in 0..SPAWN_ATTEMPTS {
            let col = self.rng.gen_range(0..width);
            let row = self.rng.gen_range(0..height);
            let tile = Tile::from_cells(col, row, unit);

            if !snake.contains_tile(&tile) {
                return Some(tile);
            }
        }

        // The snake covers most of the board
        (0..height)
            .flat_map(|row| (0..width).map(move |col| Tile::from_cells(col, row, unit)))
            .filter(|tile| !snake.contains_tile(tile))
            .choose(&mut self.rng)
    }
}
