use serde::{Deserialize, Serialize};

use super::action::Direction;

/// A position on the game grid, in pixels.
///
/// Coordinates are multiples of the grid unit the snake was built with.
/// Tiles are plain values: equal iff both coordinates are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    x: i32,
    y: i32,
}

impl Tile {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Build a tile from grid-cell indices, saturating at the i32 range
    pub fn from_cells(col: i32, row: i32, unit: i32) -> Self {
        Self::new(col.saturating_mul(unit), row.saturating_mul(unit))
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    /// The tile one grid unit away in `direction`.
    ///
    /// Coordinates saturate at the i32 range instead of wrapping.
    pub fn translated(&self, direction: Direction, unit: i32) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(
            self.x.saturating_add(unit.saturating_mul(dx)),
            self.y.saturating_add(unit.saturating_mul(dy)),
        )
    }

    /// Grid-cell indices of this tile
    pub fn cell(&self, unit: i32) -> (i32, i32) {
        (self.x.div_euclid(unit), self.y.div_euclid(unit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_structural_equality() {
        assert_eq!(Tile::new(4, 12), Tile::new(4, 12));
        assert_ne!(Tile::new(4, 12), Tile::new(12, 4));

        let set: HashSet<Tile> = [Tile::new(0, 0), Tile::new(0, 0), Tile::new(4, 0)]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_translation() {
        let tile = Tile::new(8, 8);
        assert_eq!(tile.translated(Direction::North, 4), Tile::new(8, 4));
        assert_eq!(tile.translated(Direction::South, 4), Tile::new(8, 12));
        assert_eq!(tile.translated(Direction::East, 4), Tile::new(12, 8));
        assert_eq!(tile.translated(Direction::West, 4), Tile::new(4, 8));
    }

    #[test]
    fn test_translation_saturates_at_edges() {
        let tile = Tile::new(i32::MAX - 1, i32::MIN + 1);
        assert_eq!(tile.translated(Direction::East, 4), Tile::new(i32::MAX, i32::MIN + 1));
        assert_eq!(tile.translated(Direction::North, 4), Tile::new(i32::MAX - 1, i32::MIN));
        assert_eq!(Tile::from_cells(i32::MAX, 2, 4), Tile::new(i32::MAX, 8));
    }

    #[test]
    fn test_cells() {
        let tile = Tile::from_cells(3, 5, 10);
        assert_eq!(tile, Tile::new(30, 50));
        assert_eq!(tile.cell(10), (3, 5));
        assert_eq!(Tile::new(-10, 0).cell(10), (-1, 0));
    }
}
