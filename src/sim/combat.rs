//! Collision resolution between a moving piece and its destination.
//!
//! Uses the subtraction model: the stronger side keeps the cell and loses the
//! weaker side's strength. Equal strengths annihilate to zero, and the
//! [`TieRule`] decides who is left holding the empty cell.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::grid::{Cell, MAX_STRENGTH, OwnerId};

/// Who keeps a cell after an equal-strength collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieRule {
    /// The moving piece takes the cell (the game's observed behavior).
    #[default]
    Mover,
    /// The cell's previous owner keeps it.
    Defender,
}

/// Result of a collision on a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombatResult {
    /// Owner of the destination afterwards.
    pub owner: OwnerId,
    /// Strength left on the destination.
    pub strength: u8,
}

/// Resolve `mover` entering `destination`.
///
/// Same-owner entries merge, capped at 255. Otherwise the strictly stronger
/// side wins with the difference of the two strengths.
#[must_use]
pub fn resolve_collision(mover: Cell, destination: Cell, tie_rule: TieRule) -> CombatResult {
    if mover.owner == destination.owner {
        return CombatResult {
            owner: destination.owner,
            strength: mover.strength.saturating_add(destination.strength).min(MAX_STRENGTH),
        };
    }

    let strength = mover.strength.abs_diff(destination.strength);
    let owner = match mover.strength.cmp(&destination.strength) {
        Ordering::Greater => mover.owner,
        Ordering::Less => destination.owner,
        Ordering::Equal => match tie_rule {
            TieRule::Mover => mover.owner,
            TieRule::Defender => destination.owner,
        },
    };
    CombatResult { owner, strength }
}
