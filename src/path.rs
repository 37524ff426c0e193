//! Weighted shortest paths over the grid.
//!
//! Paths are computed outward from a *target*: leaving a cell toward one of
//! its neighbors costs the strength of the cell being left, which models the
//! strength that must be spent fighting through it. The resulting predecessor
//! map therefore points every reachable cell one step closer to the target.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::grid::{Coord, Grid};

/// Costs and predecessors of a single-target search.
#[derive(Debug, Clone)]
pub struct PathResult {
    /// Root of the search.
    target: Coord,
    /// Grid width, for indexing.
    width: u16,
    /// Cumulative traversal cost per cell (`None` = unreached).
    costs: Vec<Option<u32>>,
    /// Next cell toward the target per cell (`None` for the target and unreached cells).
    came_from: Vec<Option<Coord>>,
}

impl PathResult {
    /// Root of the search.
    #[must_use]
    pub const fn target(&self) -> Coord {
        self.target
    }

    fn index(&self, coord: Coord) -> usize {
        usize::from(coord.y) * usize::from(self.width) + usize::from(coord.x)
    }

    /// Cumulative cost of reaching `coord` from the target.
    #[must_use]
    pub fn cost(&self, coord: Coord) -> Option<u32> {
        self.costs.get(self.index(coord)).copied().flatten()
    }

    /// The next cell from `coord` toward the target.
    #[must_use]
    pub fn predecessor(&self, coord: Coord) -> Option<Coord> {
        self.came_from.get(self.index(coord)).copied().flatten()
    }

    /// The corridor from `start` to the target.
    ///
    /// The corridor excludes `start` and ends with the target. It is empty
    /// when `start` is the target and `None` when `start` was not reached.
    #[must_use]
    pub fn reconstruct(&self, start: Coord) -> Option<Vec<Coord>> {
        self.cost(start)?;

        let mut path = Vec::new();
        let mut current = start;
        while current != self.target {
            current = self.predecessor(current)?;
            path.push(current);
            if path.len() > self.costs.len() {
                return None;
            }
        }
        Some(path)
    }
}

/// Dijkstra search rooted at `target`.
///
/// Only cells in `available` are visited (the whole grid when `None`); the
/// target itself is always available. When `start` is given the search stops
/// once `start` is settled, so costs of cells farther out may be missing.
///
/// Equal-cost ties are broken by heap order: stable for a fixed input but
/// otherwise unspecified.
#[must_use]
pub fn shortest_path(
    grid: &Grid,
    target: Coord,
    start: Option<Coord>,
    available: Option<&[Coord]>,
) -> PathResult {
    let area = grid.area();
    let mut allowed = match available {
        None => vec![true; area],
        Some(cells) => {
            let mut mask = vec![false; area];
            for &coord in cells {
                mask[grid.index(coord)] = true;
            }
            mask
        }
    };
    let root = grid.index(target);
    allowed[root] = true;

    let mut costs = vec![None; area];
    let mut came_from = vec![None; area];
    let mut settled = vec![false; area];
    let mut queue = BinaryHeap::new();

    costs[root] = Some(0);
    queue.push(Reverse((0_u32, root)));

    while let Some(Reverse((cost, idx))) = queue.pop() {
        if settled[idx] {
            continue;
        }
        settled[idx] = true;

        let current = grid.coord_at(idx);
        if start == Some(current) {
            break;
        }

        let step_cost = u32::from(grid.cells()[idx].strength);
        for neighbor in grid.cardinal_neighbors(current) {
            let n = grid.index(neighbor);
            if !allowed[n] || settled[n] {
                continue;
            }
            let new_cost = cost + step_cost;
            if costs[n].is_none_or(|old| new_cost < old) {
                costs[n] = Some(new_cost);
                came_from[n] = Some(current);
                queue.push(Reverse((new_cost, n)));
            }
        }
    }

    PathResult {
        target: grid.coord_at(root),
        width: grid.width(),
        costs,
        came_from,
    }
}
