//! Combo moves: pooling strength from a chain of owned cells.

use std::collections::HashSet;

use crate::grid::{Coord, Grid, Move, OwnerId};
use crate::policy::first_max_by;
use crate::policy::heading::relative_direction;

/// Build a chain of owned cells backward from `target` until their pooled
/// strength beats the target's.
///
/// Each link is the strongest unvisited, non-excluded owned neighbor of the
/// previous link (the first link neighbors the target). Links that do not yet
/// beat the target also contribute their production, since they will have
/// grown by the time the chain collapses.
///
/// Returns the move of the link that tips the balance toward the previous
/// link, but only when `origin` is within one step of it; longer chains can
/// not execute this turn. Returns `None` if no chain of at most `max_chain`
/// links suffices.
#[must_use]
pub fn find_combo_move(
    grid: &Grid,
    owner: OwnerId,
    origin: Coord,
    target: Coord,
    max_chain: u8,
    exclude: &HashSet<Coord>,
) -> Option<Move> {
    let goal = u32::from(grid.cell(target).strength);
    let mut pooled = 0_u32;
    let mut visited: Vec<Coord> = Vec::with_capacity(usize::from(max_chain));
    let mut prior = target;

    for _ in 0..max_chain {
        let candidates = grid
            .cardinal_neighbors(prior)
            .into_iter()
            .map(|coord| grid.cell(coord))
            .filter(|cell| {
                cell.owner == owner
                    && !visited.contains(&cell.coord)
                    && !exclude.contains(&cell.coord)
            });
        let link = first_max_by(candidates, |cell| cell.strength)?;
        visited.push(link.coord);
        pooled += u32::from(link.strength);

        if pooled > goal {
            if grid.distance(origin, link.coord) <= 1 {
                let direction = relative_direction(grid, link.coord, prior);
                return Some(Move::new(link.coord, direction));
            }
            return None;
        }

        prior = link.coord;
        pooled += u32::from(link.production);
    }

    None
}
