use serde::Serialize;
use std::collections::VecDeque;
use std::hash::{Hash, Hasher};
use tracing::{debug, warn};

use super::{
    action::Direction,
    buffer::{Buffer, Difficulty},
    config::{ConfigError, ReversalPolicy, SnakeConfig},
    tile::Tile,
};

/// The snake: an ordered body of tiles plus heading, score, growth debt and liveness.
///
/// The body is stored head first and is never empty. Growth is deferred: each
/// unit of `pending_growth` keeps the tail in place for one future move, so the
/// body lengthens by one tile per tick until the debt is paid off.
///
/// Liveness is a latch. Once the head lands on its own body the snake is dead
/// for good; only [`Snake::set_alive`] can override it.
#[derive(Debug, Clone, Serialize)]
pub struct Snake {
    body: VecDeque<Tile>,
    direction: Direction,
    pending_growth: u32,
    score: i64,
    alive: bool,
    #[serde(skip)]
    config: SnakeConfig,
}

impl Snake {
    /// Create a snake with the default layout and the given starting score
    pub fn new(score: i64) -> Self {
        Self::build(SnakeConfig::default(), score)
    }

    /// Create a snake laid out according to `config`
    pub fn with_config(config: &SnakeConfig, score: i64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config.clone(), score))
    }

    fn build(config: SnakeConfig, score: i64) -> Self {
        let head_col = config.head_column();
        let body = (0..config.start_length as i32)
            .map(|i| Tile::from_cells(head_col - i, config.start_row, config.grid_unit))
            .collect();

        Self {
            body,
            direction: Direction::East,
            pending_growth: 0,
            score,
            alive: true,
            config,
        }
    }

    /// Advance one tick in the current direction.
    ///
    /// The tail is dropped unless growth is pending, in which case one unit of
    /// growth debt is consumed instead. The new head is then checked against
    /// the rest of the body.
    pub fn step(&mut self) {
        let head = self.head();

        if self.pending_growth == 0 {
            self.body.pop_back();
        } else {
            self.pending_growth -= 1;
        }

        let new_head = head.translated(self.direction, self.config.grid_unit);
        self.body.push_front(new_head);

        self.check_self_collision();
    }

    fn check_self_collision(&mut self) {
        if !self.alive {
            return;
        }
        let head = self.head();
        if self.body.iter().skip(1).any(|tile| *tile == head) {
            debug!(x = head.x(), y = head.y(), "snake ran into itself");
            self.alive = false;
        }
    }

    /// Whether the given tile is occupied by any part of the body, head included
    pub fn contains_tile(&self, tile: &Tile) -> bool {
        self.body.contains(tile)
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn head(&self) -> Tile {
        self.body[0]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    /// Moves left in which the tail stays put
    pub fn pending_growth(&self) -> u32 {
        self.pending_growth
    }

    /// Current number of tiles in the body
    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    /// Body tiles behind the head, neck first
    pub fn body_iter(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.body.iter().skip(1)
    }

    /// All tiles, head first
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.body.iter()
    }

    pub fn config(&self) -> &SnakeConfig {
        &self.config
    }

    /// Administrative override, e.g. after an external wall check
    pub fn set_alive(&mut self, alive: bool) {
        self.alive = alive;
    }

    /// Change heading for the next move.
    ///
    /// Returns false when the reversal policy refused the turn.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.config.reversal == ReversalPolicy::Reject
            && self.body.len() > 1
            && self.direction.is_opposite(direction)
        {
            warn!(
                current = ?self.direction,
                requested = ?direction,
                "ignoring reversal into body"
            );
            return false;
        }
        self.direction = direction;
        true
    }

    /// Queue `n` tiles of growth, one per subsequent move
    pub fn gains(&mut self, n: u32) {
        self.pending_growth = self.pending_growth.saturating_add(n);
    }

    /// Adjust the score; negative values are penalties
    pub fn add_score(&mut self, n: i64) {
        self.score = self.score.saturating_add(n);
    }

    /// Let a buffer apply its effect to this snake
    pub fn add_buffer(&mut self, buffer: &dyn Buffer, difficulty: Difficulty) {
        buffer.apply_to(self, difficulty);
    }
}

impl Default for Snake {
    fn default() -> Self {
        Self::new(0)
    }
}

impl PartialEq for Snake {
    fn eq(&self, other: &Self) -> bool {
        self.body.len() == other.body.len()
            && self.direction == other.direction
            && self.alive == other.alive
            && self.pending_growth == other.pending_growth
            && self.score == other.score
            && self.body == other.body
    }
}

impl Eq for Snake {}

impl Hash for Snake {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.direction.hash(state);
        self.alive.hash(state);
        self.pending_growth.hash(state);
        self.score.hash(state);
        self.body.hash(state);
    }
}
