use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use super::buffer::Difficulty;

/// How the snake treats a turn straight back into its own neck
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReversalPolicy {
    /// Any heading is accepted; reversing into the body is a fatal move
    #[default]
    Permissive,
    /// 180-degree turns are ignored while the body is longer than one tile
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid unit must be positive, got {0}")]
    NonPositiveGridUnit(i32),
    #[error("snake must start with at least one tile")]
    EmptyStartBody,
    #[error("starting body of {0} tiles is too long")]
    StartBodyTooLong(usize),
    #[error("starting body does not fit in pixel coordinates with grid unit {grid_unit}")]
    StartOutOfRange { grid_unit: i32 },
    #[error("grid {width}x{height} with grid unit {grid_unit} does not fit in pixel coordinates")]
    GridTooLarge {
        width: usize,
        height: usize,
        grid_unit: i32,
    },
    #[error("grid {width}x{height} has no room to place food")]
    GridTooSmall { width: usize, height: usize },
    #[error("starting body (columns {first_col}..={last_col}, row {row}) lies outside the {width}x{height} grid")]
    StartOutsideGrid {
        first_col: i32,
        last_col: i32,
        row: i32,
        width: usize,
        height: usize,
    },
}

/// Configuration for a single snake
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeConfig {
    /// Pixel size of one grid step
    pub grid_unit: i32,
    /// Number of tiles in the starting body
    pub start_length: usize,
    /// Grid row the starting body is laid out on
    pub start_row: i32,
    /// Column of the starting tail
    pub start_offset_units: i32,
    pub reversal: ReversalPolicy,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            grid_unit: 4,
            start_length: 3,
            start_row: 3,
            start_offset_units: 0,
            reversal: ReversalPolicy::Permissive,
        }
    }
}

impl SnakeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_unit <= 0 {
            return Err(ConfigError::NonPositiveGridUnit(self.grid_unit));
        }
        if self.start_length == 0 {
            return Err(ConfigError::EmptyStartBody);
        }
        let length = i32::try_from(self.start_length)
            .map_err(|_| ConfigError::StartBodyTooLong(self.start_length))?;

        // Every starting tile, plus one step past it, must stay representable
        let in_range = |cell: i32| {
            let scaled = |c: Option<i32>| c.and_then(|c| c.checked_mul(self.grid_unit)).is_some();
            scaled(cell.checked_sub(1)) && scaled(cell.checked_add(1))
        };
        let fits = self
            .start_offset_units
            .checked_add(length - 1)
            .is_some_and(|head_col| {
                in_range(head_col) && in_range(self.start_offset_units) && in_range(self.start_row)
            });
        if !fits {
            return Err(ConfigError::StartOutOfRange {
                grid_unit: self.grid_unit,
            });
        }
        Ok(())
    }

    /// Column of the starting head
    pub fn head_column(&self) -> i32 {
        self.start_offset_units + self.start_length as i32 - 1
    }
}

/// Configuration for the headless game driver
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the board in grid cells
    pub grid_width: usize,
    /// Height of the board in grid cells
    pub grid_height: usize,
    pub difficulty: Difficulty,
    /// Tiles gained per food eaten
    pub food_growth: u32,
    /// Base points per food eaten, scaled by difficulty
    pub food_points: i64,
    /// Seed for food placement; random when absent
    pub seed: Option<u64>,
    pub snake: SnakeConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            difficulty: Difficulty::Normal,
            food_growth: 1,
            food_points: 10,
            seed: None,
            snake: SnakeConfig::default(),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Read a JSON config file; missing fields fall back to defaults
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.snake.validate()?;

        // One cell past each edge must fit too, that is where a wall hit lands
        let extent = |cells: usize| {
            i32::try_from(cells)
                .ok()
                .and_then(|cells| cells.checked_add(1))
                .and_then(|cells| cells.checked_mul(self.snake.grid_unit))
        };
        if extent(self.grid_width).is_none() || extent(self.grid_height).is_none() {
            return Err(ConfigError::GridTooLarge {
                width: self.grid_width,
                height: self.grid_height,
                grid_unit: self.snake.grid_unit,
            });
        }

        let cells = self.grid_width.saturating_mul(self.grid_height);
        if cells <= self.snake.start_length {
            return Err(ConfigError::GridTooSmall {
                width: self.grid_width,
                height: self.grid_height,
            });
        }

        let first_col = self.snake.start_offset_units;
        let last_col = self.snake.head_column();
        let row = self.snake.start_row;
        let fits = first_col >= 0
            && (last_col as i64) < self.grid_width as i64
            && row >= 0
            && (row as i64) < self.grid_height as i64;
        if !fits {
            return Err(ConfigError::StartOutsideGrid {
                first_col,
                last_col,
                row,
                width: self.grid_width,
                height: self.grid_height,
            });
        }

        Ok(())
    }
}
