//! Overflow avoidance for friendly merges.

use std::cmp::Reverse;
use std::collections::HashMap;

use crate::grid::{Coord, Grid, MAX_STRENGTH, Move};

/// Downgrade moves that would overflow a friendly cell.
///
/// Moves are stably sorted by source strength, strongest first, and returned
/// in that order. Each cell tracks the strength already committed to it: a
/// `Still` move commits the piece to its own cell, and a move into a cell
/// owned by the mover commits it there. A move whose commitment would push
/// its destination past 255 becomes `Still` and commits nothing.
#[must_use]
pub fn resolve_overflow(grid: &Grid, moves: &[Move]) -> Vec<Move> {
    let mut ordered = moves.to_vec();
    ordered.sort_by_key(|mv| Reverse(grid.cell(mv.coord).strength));

    let mut committed: HashMap<Coord, u32> = HashMap::new();
    for mv in &mut ordered {
        let source = grid.cell(mv.coord);
        if mv.is_still() {
            *committed.entry(mv.coord).or_insert(0) += u32::from(source.strength);
            continue;
        }

        let destination = grid.cell(grid.step(mv.coord, mv.direction));
        if destination.owner != source.owner {
            continue;
        }
        let total = committed.get(&destination.coord).copied().unwrap_or(0)
            + u32::from(source.strength);
        if total > u32::from(MAX_STRENGTH) {
            *mv = Move::still(mv.coord);
        } else {
            committed.insert(destination.coord, total);
        }
    }

    ordered
}
