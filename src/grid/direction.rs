//! Movement directions and move commands.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::grid::Coord;

/// A movement direction. `Still` keeps the piece in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    /// Stay on the current cell.
    Still = 0,
    /// Toward decreasing `y`.
    North = 1,
    /// Toward increasing `x`.
    East = 2,
    /// Toward increasing `y`.
    South = 3,
    /// Toward decreasing `x`.
    West = 4,
}

/// The four cardinal directions in enumeration order.
pub const CARDINALS: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

impl Direction {
    /// Unit offset `(dx, dy)` of this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Still => (0, 0),
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Still => "still",
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        };
        f.write_str(name)
    }
}

/// An intended move for the piece on `coord`. Not yet applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Source cell.
    pub coord: Coord,
    /// Direction to move in.
    pub direction: Direction,
}

impl Move {
    /// Create a move.
    #[must_use]
    pub const fn new(coord: Coord, direction: Direction) -> Self {
        Self { coord, direction }
    }

    /// Create a move that keeps the piece in place.
    #[must_use]
    pub const fn still(coord: Coord) -> Self {
        Self::new(coord, Direction::Still)
    }

    /// Whether this move leaves the piece in place.
    #[must_use]
    pub fn is_still(&self) -> bool {
        self.direction == Direction::Still
    }
}
