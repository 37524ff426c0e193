//! Turn simulation.
//!
//! Applies a batch of moves to a [`Grid`] the way the game engine does, close
//! enough for planning: friendly merges are capped at 255, collisions use the
//! subtraction model, and every owned cell that neither moved nor absorbed a
//! friendly piece accrues its production.
//!
//! Moves resolve sequentially in the order produced by [`resolve_overflow`].
//! Each move belongs to whoever owned its source before the batch started:
//! a move whose source has since changed hands, or has already sent its
//! piece away, is dropped. The real engine resolves simultaneously, so
//! outcomes still differ from it whenever pieces meet mid-batch (several
//! pieces converging on one cell, or a piece leaving a cell another piece
//! has just entered).

mod combat;
mod overflow;
mod score;

pub use combat::{CombatResult, TieRule, resolve_collision};
pub use overflow::resolve_overflow;
pub use score::{SimulationScore, score};

use crate::grid::{Grid, MAX_STRENGTH, Move, OwnerId};

/// What happened while applying one batch of moves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnSummary {
    /// Moves that actually left their cell.
    pub moved: usize,
    /// Moves turned into `Still` by the overflow pass.
    pub downgraded: usize,
    /// Cells that changed owner.
    pub captures: usize,
}

/// Applies move batches to a grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnSimulator {
    tie_rule: TieRule,
}

impl TurnSimulator {
    /// Create a simulator with the given tie rule.
    #[must_use]
    pub const fn new(tie_rule: TieRule) -> Self {
        Self { tie_rule }
    }

    /// Apply `moves` to `grid`, then accrue production if requested.
    ///
    /// Moves out of unclaimed cells are ignored, and so are moves whose
    /// source was captured or already emptied earlier in the batch. A moving
    /// piece leaves its source at zero strength under the same owner.
    /// Production skips every source that moved and every destination the
    /// mover holds afterwards, and is capped at 255.
    pub fn apply(&self, grid: &mut Grid, moves: &[Move], accrue_production: bool) -> TurnSummary {
        let ordered = resolve_overflow(grid, moves);
        let mut summary = TurnSummary {
            downgraded: ordered
                .iter()
                .filter(|mv| mv.is_still())
                .count()
                .saturating_sub(moves.iter().filter(|mv| mv.is_still()).count()),
            ..TurnSummary::default()
        };

        // Owners before the batch; a move only acts for its source's original owner.
        let owners: Vec<OwnerId> = grid.iter().map(|cell| cell.owner).collect();
        let mut departed = vec![false; grid.area()];
        let mut skip_production = vec![false; grid.area()];
        for mv in ordered.iter().filter(|mv| !mv.is_still()) {
            let source = grid.cell(mv.coord);
            let idx = grid.index(mv.coord);
            if source.is_neutral() || source.owner != owners[idx] || departed[idx] {
                continue;
            }
            departed[idx] = true;
            let destination = grid.cell(grid.step(mv.coord, mv.direction));
            let outcome = resolve_collision(source, destination, self.tie_rule);

            grid.set(destination.with_state(outcome.owner, outcome.strength));
            grid.set(source.with_state(source.owner, 0));
            skip_production[grid.index(source.coord)] = true;
            if outcome.owner == source.owner {
                skip_production[grid.index(destination.coord)] = true;
            }

            summary.moved += 1;
            if outcome.owner != destination.owner {
                summary.captures += 1;
            }
        }

        if accrue_production {
            let updated: Vec<_> = grid
                .iter()
                .zip(&skip_production)
                .filter(|(cell, skip)| !cell.is_neutral() && !**skip)
                .map(|(cell, _)| {
                    let strength = cell.strength.saturating_add(cell.production).min(MAX_STRENGTH);
                    cell.with_state(cell.owner, strength)
                })
                .collect();
            for cell in updated {
                grid.set(cell);
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Cell, Coord, Direction, NEUTRAL};

    fn empty(width: u16, height: u16) -> Grid {
        Grid::new(width, height).unwrap()
    }

    #[test]
    fn test_capture_leaves_difference() {
        let mut grid = empty(5, 5);
        grid.set(Cell::new(Coord::new(2, 2), 1, 5, 1));
        grid.set(Cell::new(Coord::new(2, 3), NEUTRAL, 3, 2));

        let summary = TurnSimulator::default().apply(
            &mut grid,
            &[Move::new(Coord::new(2, 2), Direction::South)],
            true,
        );

        assert_eq!(grid.cell(Coord::new(2, 3)).owner, 1);
        assert_eq!(grid.cell(Coord::new(2, 3)).strength, 2);
        assert_eq!(grid.cell(Coord::new(2, 2)).owner, 1);
        assert_eq!(grid.cell(Coord::new(2, 2)).strength, 0);
        assert_eq!(
            summary,
            TurnSummary {
                moved: 1,
                downgraded: 0,
                captures: 1
            }
        );
    }

    #[test]
    fn test_failed_attack_weakens_defender() {
        let mut grid = empty(5, 5);
        grid.set(Cell::new(Coord::new(2, 2), 1, 4, 1));
        grid.set(Cell::new(Coord::new(3, 2), 2, 10, 1));

        TurnSimulator::default().apply(
            &mut grid,
            &[Move::new(Coord::new(2, 2), Direction::East)],
            false,
        );

        assert_eq!(grid.cell(Coord::new(3, 2)).owner, 2);
        assert_eq!(grid.cell(Coord::new(3, 2)).strength, 6);
        assert_eq!(grid.cell(Coord::new(2, 2)).strength, 0);
    }

    #[test]
    fn test_tie_rule_decides_owner() {
        let setup = || {
            let mut grid = empty(5, 5);
            grid.set(Cell::new(Coord::new(1, 1), 1, 7, 1));
            grid.set(Cell::new(Coord::new(2, 1), 2, 7, 1));
            grid
        };
        let mv = [Move::new(Coord::new(1, 1), Direction::East)];

        let mut grid = setup();
        TurnSimulator::new(TieRule::Mover).apply(&mut grid, &mv, false);
        assert_eq!(grid.cell(Coord::new(2, 1)).owner, 1);
        assert_eq!(grid.cell(Coord::new(2, 1)).strength, 0);

        let mut grid = setup();
        TurnSimulator::new(TieRule::Defender).apply(&mut grid, &mv, false);
        assert_eq!(grid.cell(Coord::new(2, 1)).owner, 2);
        assert_eq!(grid.cell(Coord::new(2, 1)).strength, 0);
    }

    #[test]
    fn test_production_only_turn() {
        let mut grid = empty(4, 4);
        grid.set(Cell::new(Coord::new(0, 0), 1, 250, 10));
        grid.set(Cell::new(Coord::new(1, 0), 1, 10, 3));
        grid.set(Cell::new(Coord::new(2, 0), NEUTRAL, 10, 3));

        TurnSimulator::default().apply(&mut grid, &[], true);

        assert_eq!(grid.cell(Coord::new(0, 0)).strength, 255);
        assert_eq!(grid.cell(Coord::new(1, 0)).strength, 13);
        assert_eq!(grid.cell(Coord::new(2, 0)).strength, 10);
    }

    #[test]
    fn test_merge_destination_skips_production() {
        let mut grid = empty(4, 4);
        grid.set(Cell::new(Coord::new(0, 0), 1, 20, 5));
        grid.set(Cell::new(Coord::new(1, 0), 1, 30, 5));
        grid.set(Cell::new(Coord::new(3, 3), 1, 30, 5));

        TurnSimulator::default().apply(
            &mut grid,
            &[Move::new(Coord::new(0, 0), Direction::East)],
            true,
        );

        assert_eq!(grid.cell(Coord::new(1, 0)).strength, 50);
        assert_eq!(grid.cell(Coord::new(0, 0)).strength, 0);
        assert_eq!(grid.cell(Coord::new(3, 3)).strength, 35);
    }

    #[test]
    fn test_overflowing_merge_stays() {
        let mut grid = empty(5, 5);
        grid.set(Cell::new(Coord::new(1, 2), 1, 200, 1));
        grid.set(Cell::new(Coord::new(2, 2), 1, 10, 1));
        grid.set(Cell::new(Coord::new(3, 2), 1, 100, 1));

        let summary = TurnSimulator::default().apply(
            &mut grid,
            &[
                Move::new(Coord::new(1, 2), Direction::East),
                Move::new(Coord::new(3, 2), Direction::West),
            ],
            false,
        );

        assert_eq!(summary.downgraded, 1);
        assert_eq!(grid.cell(Coord::new(2, 2)).strength, 210);
        assert_eq!(grid.cell(Coord::new(3, 2)).strength, 100);
    }

    #[test]
    fn test_captured_source_does_not_move() {
        let mut grid = empty(6, 6);
        grid.set(Cell::new(Coord::new(1, 1), 1, 10, 1));
        grid.set(Cell::new(Coord::new(2, 1), 2, 5, 1));

        // Player 1 takes (2,1) before player 2's retreat from it resolves.
        let summary = TurnSimulator::default().apply(
            &mut grid,
            &[
                Move::new(Coord::new(1, 1), Direction::East),
                Move::new(Coord::new(2, 1), Direction::East),
            ],
            false,
        );

        assert_eq!(summary.moved, 1);
        assert_eq!(summary.captures, 1);
        assert_eq!(grid.cell(Coord::new(1, 1)), Cell::new(Coord::new(1, 1), 1, 0, 1));
        assert_eq!(grid.cell(Coord::new(2, 1)), Cell::new(Coord::new(2, 1), 1, 5, 1));
        assert_eq!(grid.cell(Coord::new(3, 1)), Cell::new(Coord::new(3, 1), NEUTRAL, 0, 0));
        assert_eq!(grid.owned_by(1).count(), 2);
        assert_eq!(grid.owned_by(2).count(), 0);
    }

    #[test]
    fn test_repeated_source_moves_once() {
        let mut grid = empty(5, 5);
        grid.set(Cell::new(Coord::new(2, 2), 1, 40, 1));
        grid.set(Cell::new(Coord::new(3, 2), NEUTRAL, 10, 1));
        grid.set(Cell::new(Coord::new(2, 3), NEUTRAL, 10, 1));

        let summary = TurnSimulator::default().apply(
            &mut grid,
            &[
                Move::new(Coord::new(2, 2), Direction::East),
                Move::new(Coord::new(2, 2), Direction::South),
            ],
            false,
        );

        assert_eq!(summary.moved, 1);
        assert_eq!(grid.cell(Coord::new(3, 2)).owner, 1);
        assert_eq!(grid.cell(Coord::new(3, 2)).strength, 30);
        assert_eq!(grid.cell(Coord::new(2, 3)).owner, NEUTRAL);
        assert_eq!(grid.cell(Coord::new(2, 3)).strength, 10);
    }

    #[test]
    fn test_neutral_sources_ignored() {
        let mut grid = empty(4, 4);
        grid.set(Cell::new(Coord::new(1, 1), NEUTRAL, 50, 1));
        grid.set(Cell::new(Coord::new(2, 1), 1, 10, 1));

        let summary = TurnSimulator::default().apply(
            &mut grid,
            &[Move::new(Coord::new(1, 1), Direction::East)],
            false,
        );

        assert_eq!(summary.moved, 0);
        assert_eq!(grid.cell(Coord::new(2, 1)), Cell::new(Coord::new(2, 1), 1, 10, 1));
    }
}
