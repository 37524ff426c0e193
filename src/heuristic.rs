//! Capture-value heuristics.
//!
//! Two scores drive target selection:
//! - [`local_potential`] ranks long-term campaign targets by how much
//!   production their neighborhood yields per unit of strength.
//! - [`HeuristicEvaluator::capture_value`] scores a single capture for the
//!   per-turn policy, looking ahead through neighbors with geometric decay.
//!
//! # Cost
//!
//! `capture_value` branches four ways per level, so its cost grows as
//! `4^depth`. Depth is a validated [`Depth`] that never exceeds
//! [`MAX_DEPTH`].

use crate::error::ConfigError;
use crate::grid::{Coord, Grid, NEUTRAL, OwnerId};

/// Largest accepted recursion depth for [`HeuristicEvaluator::capture_value`].
pub const MAX_DEPTH: u8 = 3;

/// Radius summed by [`local_potential`].
const POTENTIAL_RADIUS: u16 = 3;

/// Radius of the enemy strength sum for terminal captures.
const THREAT_RADIUS: u16 = 2;

/// Weight of enemy strength in terminal captures.
const THREAT_WEIGHT: f64 = 100.0;

/// A heuristic recursion depth in `1..=MAX_DEPTH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Depth(u8);

impl Depth {
    /// Depth one: score the cell itself.
    pub const ONE: Self = Self(1);
    /// Depth two: the cell plus one level of lookahead.
    pub const TWO: Self = Self(2);

    /// Validate a depth.
    ///
    /// # Errors
    ///
    /// Returns an error if `depth` is zero or above [`MAX_DEPTH`].
    pub const fn new(depth: u8) -> Result<Self, ConfigError> {
        if depth == 0 {
            Err(ConfigError::DepthZero)
        } else if depth > MAX_DEPTH {
            Err(ConfigError::DepthTooLarge {
                depth,
                max: MAX_DEPTH,
            })
        } else {
            Ok(Self(depth))
        }
    }

    /// The raw depth.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// Production-per-strength of a cell plus every cell within radius 3.
#[must_use]
pub fn local_potential(grid: &Grid, coord: Coord) -> f64 {
    grid.cell(coord).yield_ratio()
        + grid
            .neighbors(coord, POTENTIAL_RADIUS)
            .map(|n| grid.cell(n).yield_ratio())
            .sum::<f64>()
}

/// Cells visited on the current recursion branch.
///
/// A small `Copy` value: every recursive call receives its own extended
/// copy, so sibling branches never observe each other's visits.
#[derive(Debug, Clone, Copy)]
struct Trail {
    cells: [Coord; MAX_DEPTH as usize],
    len: usize,
}

impl Trail {
    const EMPTY: Self = Self {
        cells: [Coord::new(0, 0); MAX_DEPTH as usize],
        len: 0,
    };

    fn contains(&self, coord: Coord) -> bool {
        self.cells[..self.len].contains(&coord)
    }

    fn with(mut self, coord: Coord) -> Self {
        if self.len < self.cells.len() {
            self.cells[self.len] = coord;
            self.len += 1;
        }
        self
    }
}

/// Scores captures from the point of view of one player.
#[derive(Debug, Clone, Copy)]
pub struct HeuristicEvaluator {
    owner: OwnerId,
    alpha: f64,
}

impl HeuristicEvaluator {
    /// Create an evaluator for `owner` with lookahead decay `alpha`.
    ///
    /// # Errors
    ///
    /// Returns an error unless `0 < alpha < 1`.
    pub fn new(owner: OwnerId, alpha: f64) -> Result<Self, ConfigError> {
        if alpha > 0.0 && alpha < 1.0 {
            Ok(Self { owner, alpha })
        } else {
            Err(ConfigError::AlphaOutOfRange(alpha))
        }
    }

    /// The player this evaluator scores for.
    #[must_use]
    pub const fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Value of capturing the cell at `coord`.
    ///
    /// - Own cells score 0.
    /// - Unclaimed cells with strength score their production ratio plus
    ///   `alpha` times the best neighbor's score one level deeper.
    /// - Enemy cells and empty unclaimed cells are terminal: 100 times the
    ///   enemy strength within two steps, since fighting there pays off most.
    #[must_use]
    pub fn capture_value(&self, grid: &Grid, coord: Coord, depth: Depth) -> f64 {
        self.score(grid, coord, Trail::EMPTY, depth.get())
    }

    fn score(&self, grid: &Grid, coord: Coord, trail: Trail, depth: u8) -> f64 {
        let cell = grid.cell(coord);
        if depth < 1 || cell.owner == self.owner || trail.contains(coord) {
            return 0.0;
        }

        if cell.owner != NEUTRAL || cell.strength == 0 {
            let threat: u32 = grid
                .neighbors(coord, THREAT_RADIUS)
                .filter(|&n| !trail.contains(n))
                .map(|n| grid.cell(n))
                .filter(|n| n.is_enemy_of(self.owner))
                .map(|n| u32::from(n.strength))
                .sum();
            return f64::from(threat) * THREAT_WEIGHT;
        }

        let trail = trail.with(coord);
        let lookahead = grid
            .cardinal_neighbors(coord)
            .into_iter()
            .map(|n| self.score(grid, n, trail, depth - 1))
            .fold(0.0_f64, f64::max);

        cell.yield_ratio() + self.alpha * lookahead
    }
}
