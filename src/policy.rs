//! Per-cell move selection.
//!
//! [`MoveSelector::select`] decides what one owned cell does this turn. The
//! branches are tried in a fixed order and the first applicable one wins:
//!
//! 1. Empty cells stay.
//! 2. An assigned target is pursued (combo move, or a direct walk when the
//!    target is already ours).
//! 3. An adjacent zero-strength cell we do not own becomes the target.
//! 4. The best capturable neighbor is taken if we are stronger.
//! 5. Weak cells stay and accumulate production.
//! 6. Everything else heads for the nearest enemy or unclaimed cell,
//!    pushing an overfull destination onward.

mod combo;
mod heading;

use std::collections::HashSet;

pub use combo::find_combo_move;
pub use heading::{Heading, nearest_target_direction, relative_direction};

use crate::config::PlannerConfig;
use crate::error::ConfigError;
use crate::grid::{CARDINALS, Cell, Coord, Grid, MAX_STRENGTH, Move, OwnerId};
use crate::heuristic::{Depth, HeuristicEvaluator};

/// Target assigned to a cell by the campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Target {
    /// No explicit target: use the local policy.
    #[default]
    None,
    /// Work toward capturing or reaching this cell.
    Cell(Coord),
}

/// First item with the strictly greatest key; earlier items win ties.
pub(crate) fn first_max_by<T, K, I, F>(items: I, mut key: F) -> Option<T>
where
    I: IntoIterator<Item = T>,
    K: PartialOrd,
    F: FnMut(&T) -> K,
{
    let mut best: Option<(T, K)> = None;
    for item in items {
        let score = key(&item);
        let better = match &best {
            Some((_, top)) => score > *top,
            None => true,
        };
        if better {
            best = Some((item, score));
        }
    }
    best.map(|(item, _)| item)
}

/// The per-cell move policy for one player.
#[derive(Debug, Clone, Copy)]
pub struct MoveSelector {
    evaluator: HeuristicEvaluator,
    attack_depth: Depth,
    probe_depth: Depth,
    combo_max_chain: u8,
    direct_move_threshold: u8,
    accumulate_factor: u16,
}

impl MoveSelector {
    /// Build the policy for `owner` from a config.
    ///
    /// # Errors
    ///
    /// Returns an error if any heuristic parameter is out of range.
    pub fn from_config(owner: OwnerId, config: &PlannerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            evaluator: HeuristicEvaluator::new(owner, config.alpha)?,
            attack_depth: Depth::new(config.attack_depth)?,
            probe_depth: Depth::new(config.probe_depth)?,
            combo_max_chain: config.combo_max_chain,
            direct_move_threshold: config.direct_move_threshold,
            accumulate_factor: config.accumulate_factor,
        })
    }

    /// The player this policy moves for.
    #[must_use]
    pub const fn owner(&self) -> OwnerId {
        self.evaluator.owner()
    }

    /// Moves for the owned cell at `coord`.
    ///
    /// Usually a single move; expansion into an overfull owned cell also
    /// pushes that cell onward. Combo moves may move a neighboring cell
    /// instead of `coord`. Cells in `exclude` have already moved this turn
    /// and are never recruited into a combo chain.
    #[must_use]
    pub fn select(
        &self,
        grid: &Grid,
        coord: Coord,
        exclude: &HashSet<Coord>,
        target: Target,
    ) -> Vec<Move> {
        let cell = grid.cell(coord);
        if cell.strength == 0 {
            return vec![Move::still(coord)];
        }

        match target {
            Target::Cell(goal) => return self.pursue(grid, cell, goal, exclude),
            Target::None => {}
        }

        let owner = self.owner();
        let open = grid
            .cardinal_neighbors(coord)
            .into_iter()
            .filter(|&n| {
                let neighbor = grid.cell(n);
                neighbor.owner != owner && neighbor.strength == 0
            });
        if let Some(goal) = first_max_by(open, |&n| {
            self.evaluator.capture_value(grid, n, self.attack_depth)
        }) {
            return self.pursue(grid, cell, goal, exclude);
        }

        let capturable = CARDINALS
            .into_iter()
            .map(|direction| (direction, grid.cell(grid.step(coord, direction))))
            .filter(|(_, neighbor)| neighbor.owner != owner);
        if let Some((direction, neighbor)) = first_max_by(capturable, |(_, neighbor)| {
            self.evaluator
                .capture_value(grid, neighbor.coord, self.probe_depth)
        }) {
            if neighbor.strength < cell.strength {
                return vec![Move::new(coord, direction)];
            }
        }

        if u32::from(cell.strength) <= u32::from(cell.production) * u32::from(self.accumulate_factor)
        {
            return vec![Move::still(coord)];
        }

        self.expand(grid, cell)
    }

    /// Work toward an explicit target.
    fn pursue(&self, grid: &Grid, cell: Cell, goal: Coord, exclude: &HashSet<Coord>) -> Vec<Move> {
        let owner = self.owner();
        if grid.cell(goal).owner != owner {
            let combo = find_combo_move(grid, owner, cell.coord, goal, self.combo_max_chain, exclude);
            return vec![combo.unwrap_or(Move::still(cell.coord))];
        }
        if cell.strength > self.direct_move_threshold {
            return vec![Move::new(
                cell.coord,
                relative_direction(grid, cell.coord, goal),
            )];
        }
        vec![Move::still(cell.coord)]
    }

    /// Head for the nearest enemy or unclaimed cell.
    fn expand(&self, grid: &Grid, cell: Cell) -> Vec<Move> {
        let owner = self.owner();
        let border = grid
            .cardinal_neighbors(cell.coord)
            .into_iter()
            .any(|n| grid.cell(n).owner != owner);
        let heading = nearest_target_direction(grid, owner, cell.coord);

        if border && !heading.enemy {
            return vec![Move::still(cell.coord)];
        }

        let advance = Move::new(cell.coord, heading.direction);
        let destination = grid.cell(grid.step(cell.coord, heading.direction));
        let combined = u16::from(destination.strength) + u16::from(cell.strength);
        if destination.owner == owner && combined > u16::from(MAX_STRENGTH) {
            return vec![advance, Move::new(destination.coord, heading.direction)];
        }
        vec![advance]
    }
}
