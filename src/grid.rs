//! Toroidal grid of cells.
//!
//! The grid is the only state the engine reasons about:
//! - Cells with owner, strength and production
//! - Wraparound neighbors, directions and distances
//! - Row-major iteration used by every per-turn pass

mod cell;
mod direction;
mod map;

pub use cell::{Cell, Coord, MAX_STRENGTH, NEUTRAL, OwnerId};
pub use direction::{CARDINALS, Direction, Move};
pub use map::Grid;
