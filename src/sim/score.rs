//! Position evaluation for a single owner.

use std::cmp::Ordering;

use serde::Serialize;

use crate::grid::{Grid, OwnerId};

/// Totals over every cell an owner holds.
///
/// Ordered by production first, then territory, then strength: production
/// compounds over a campaign, so it dominates the comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct SimulationScore {
    /// Number of owned cells.
    pub territory: u32,
    /// Sum of strength over owned cells.
    pub strength: u32,
    /// Sum of production over owned cells.
    pub production: u32,
}

impl SimulationScore {
    fn key(self) -> (u32, u32, u32) {
        (self.production, self.territory, self.strength)
    }
}

impl Ord for SimulationScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl PartialOrd for SimulationScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Score `owner`'s position on `grid`.
#[must_use]
pub fn score(grid: &Grid, owner: OwnerId) -> SimulationScore {
    grid.owned_by(owner)
        .fold(SimulationScore::default(), |mut acc, cell| {
            acc.territory += 1;
            acc.strength += u32::from(cell.strength);
            acc.production += u32::from(cell.production);
            acc
        })
}
