//! Coordinates and cell records.

use serde::{Deserialize, Serialize};

/// Identifier of a player. `0` is the neutral owner.
pub type OwnerId = u8;

/// Owner id of unclaimed cells.
pub const NEUTRAL: OwnerId = 0;

/// Strength cap applied by merges and production.
pub const MAX_STRENGTH: u8 = 255;

/// A coordinate on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// X coordinate (column).
    pub x: u16,
    /// Y coordinate (row).
    pub y: u16,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// A single cell of territory.
///
/// Cells are plain values: a turn transition writes a new record over the
/// old one rather than mutating fields piecemeal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Position of this cell.
    pub coord: Coord,
    /// Owner of this cell (`NEUTRAL` when unclaimed).
    pub owner: OwnerId,
    /// Combat and movement capacity.
    pub strength: u8,
    /// Strength gained per turn while the cell stays still.
    pub production: u8,
}

impl Cell {
    /// Create a cell record.
    #[must_use]
    pub const fn new(coord: Coord, owner: OwnerId, strength: u8, production: u8) -> Self {
        Self {
            coord,
            owner,
            strength,
            production,
        }
    }

    /// Whether nobody owns this cell.
    #[must_use]
    pub const fn is_neutral(&self) -> bool {
        self.owner == NEUTRAL
    }

    /// Whether the cell belongs to a player other than `me`.
    #[must_use]
    pub const fn is_enemy_of(&self, me: OwnerId) -> bool {
        self.owner != NEUTRAL && self.owner != me
    }

    /// Production per unit of strength, with the denominator floored at 1.
    #[must_use]
    pub fn yield_ratio(&self) -> f64 {
        f64::from(self.production) / f64::from(self.strength.max(1))
    }

    /// Copy of this cell with a new owner and strength.
    #[must_use]
    pub const fn with_state(self, owner: OwnerId, strength: u8) -> Self {
        Self {
            owner,
            strength,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enemy_of() {
        let cell = Cell::new(Coord::new(0, 0), 2, 10, 1);
        assert!(cell.is_enemy_of(1));
        assert!(!cell.is_enemy_of(2));
        assert!(!Cell::new(Coord::new(0, 0), NEUTRAL, 10, 1).is_enemy_of(1));
    }

    #[test]
    fn test_yield_ratio_floors_zero_strength() {
        let cell = Cell::new(Coord::new(0, 0), NEUTRAL, 0, 4);
        assert!((cell.yield_ratio() - 4.0).abs() < f64::EPSILON);

        let cell = Cell::new(Coord::new(0, 0), NEUTRAL, 8, 4);
        assert!((cell.yield_ratio() - 0.5).abs() < f64::EPSILON);
    }
}
