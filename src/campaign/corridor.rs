//! Corridor following: per-turn move generation along a committed path.

use std::collections::HashSet;

use crate::grid::{Coord, Grid, Move};
use crate::policy::{MoveSelector, Target};
use crate::sim::TurnSimulator;

/// A committed path toward an expansion target.
///
/// Holds the cells after the start cell, ending with the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corridor {
    cells: Vec<Coord>,
}

impl Corridor {
    /// Wrap a reconstructed path. Returns `None` for an empty path.
    #[must_use]
    pub fn new(cells: Vec<Coord>) -> Option<Self> {
        if cells.is_empty() {
            None
        } else {
            Some(Self { cells })
        }
    }

    /// The corridor cells, target last.
    #[must_use]
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    /// The final cell of the corridor.
    #[must_use]
    pub fn target(&self) -> Coord {
        self.cells[self.cells.len() - 1]
    }

    /// The corridor cell best suited as a target for the cell at `coord`.
    ///
    /// Picks the cell whose distance is closest to one step, preferring cells
    /// further along the corridor. The flag is set when the pick is the
    /// corridor's final cell.
    #[must_use]
    pub fn assign(&self, grid: &Grid, coord: Coord) -> (Coord, bool) {
        let target = self.target();
        let pick = self
            .cells
            .iter()
            .rev()
            .copied()
            .min_by_key(|&cell| grid.distance(cell, coord).abs_diff(1))
            .unwrap_or(target);
        (pick, pick == target)
    }
}

/// Moves for one turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnPlan {
    /// Moves in generation order, before the overflow pass.
    pub moves: Vec<Move>,
    /// Whether the corridor ran out during this turn.
    pub corridor_finished: bool,
}

/// Generate one turn of moves for every owned cell, in row-major order.
///
/// While a corridor is active each cell is assigned a corridor cell as its
/// target. Assigning the final cell drops the corridor, so later cells fall
/// back to the local policy. A cell that already moved this turn is skipped,
/// and later moves for it are discarded.
#[must_use]
pub fn plan_turn(grid: &Grid, selector: &MoveSelector, corridor: &mut Option<Corridor>) -> TurnPlan {
    let owned: Vec<Coord> = grid.owned_by(selector.owner()).map(|cell| cell.coord).collect();
    let mut moved: HashSet<Coord> = HashSet::new();
    let mut plan = TurnPlan::default();

    for coord in owned {
        if moved.contains(&coord) {
            continue;
        }

        let assigned = corridor.as_ref().map(|path| path.assign(grid, coord));
        let target = match assigned {
            Some((cell, last)) => {
                if last {
                    *corridor = None;
                    plan.corridor_finished = true;
                }
                Target::Cell(cell)
            }
            None => Target::None,
        };

        for mv in selector.select(grid, coord, &moved, target) {
            if moved.contains(&mv.coord) {
                continue;
            }
            if !mv.is_still() {
                moved.insert(mv.coord);
            }
            plan.moves.push(mv);
        }
    }

    plan
}

/// Play `turns` simulated turns on a copy of `grid` and return the result.
#[must_use]
pub fn simulate(
    grid: &Grid,
    selector: &MoveSelector,
    simulator: TurnSimulator,
    corridor: Option<Corridor>,
    turns: u32,
) -> Grid {
    let mut grid = grid.clone();
    let mut corridor = corridor;
    for _ in 0..turns {
        let plan = plan_turn(&grid, selector, &mut corridor);
        simulator.apply(&mut grid, &plan.moves, true);
    }
    grid
}

/// Turns until `corridor` is exhausted when followed from `grid`.
///
/// Returns `max_turns` if the corridor is still active after that many turns.
#[must_use]
pub fn corridor_horizon(
    grid: &Grid,
    selector: &MoveSelector,
    simulator: TurnSimulator,
    corridor: Corridor,
    max_turns: u32,
) -> u32 {
    let mut grid = grid.clone();
    let mut corridor = Some(corridor);
    for turn in 1..=max_turns {
        let plan = plan_turn(&grid, selector, &mut corridor);
        if plan.corridor_finished {
            return turn;
        }
        simulator.apply(&mut grid, &plan.moves, true);
    }
    max_turns
}
