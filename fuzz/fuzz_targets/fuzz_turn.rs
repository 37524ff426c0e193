#![no_main]

//! Turn fuzzer.
//!
//! Builds a small map from raw bytes, lets the move policy plan a turn for
//! player 1, mixes in arbitrary moves, and applies the batch. Checks that
//! the policy only moves owned cells and that a turn without production
//! never creates strength.

use arbitrary::Arbitrary;
use frontier::campaign::{Corridor, plan_turn};
use frontier::grid::{Coord, Direction, Grid, Move};
use frontier::{MoveSelector, PlannerConfig, TieRule, TurnSimulator};
use libfuzzer_sys::fuzz_target;

/// One raw cell: owner, strength, production.
#[derive(Arbitrary, Debug, Clone, Copy)]
struct FuzzCell {
    owner: u8,
    strength: u8,
    production: u8,
}

/// A raw move; coordinates are wrapped onto the map.
#[derive(Arbitrary, Debug, Clone, Copy)]
struct FuzzMove {
    x: u8,
    y: u8,
    direction: u8,
}

/// Structured input for turn fuzzing.
#[derive(Arbitrary, Debug)]
struct TurnInput {
    width: u8,
    height: u8,
    cells: Vec<FuzzCell>,
    extra_moves: Vec<FuzzMove>,
    corridor: Vec<(u8, u8)>,
    defender_wins: bool,
}

const DIRECTIONS: [Direction; 5] = [
    Direction::Still,
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

fuzz_target!(|input: TurnInput| {
    // Keep maps small so the heuristic lookahead stays cheap
    let width = u16::from(input.width % 12) + 1;
    let height = u16::from(input.height % 12) + 1;
    if input.cells.is_empty() {
        return;
    }
    let cells = &input.cells;
    let Some(grid) = Grid::from_fn(width, height, |c| {
        let raw = cells[(usize::from(c.y) * usize::from(width) + usize::from(c.x)) % cells.len()];
        (raw.owner % 4, raw.strength, raw.production % 32)
    }) else {
        return;
    };

    let wrap = |x: u8, y: u8| Coord::new(u16::from(x) % width, u16::from(y) % height);
    let selector = match MoveSelector::from_config(1, &PlannerConfig::default()) {
        Ok(selector) => selector,
        Err(_) => return,
    };
    let mut corridor = Corridor::new(
        input
            .corridor
            .iter()
            .take(16)
            .map(|&(x, y)| wrap(x, y))
            .collect(),
    );

    let plan = plan_turn(&grid, &selector, &mut corridor);
    for mv in &plan.moves {
        assert_eq!(grid.cell(mv.coord).owner, 1, "policy moved a foreign cell");
    }

    let mut moves = plan.moves;
    moves.extend(input.extra_moves.iter().take(64).map(|m| {
        Move::new(
            wrap(m.x, m.y),
            DIRECTIONS[usize::from(m.direction) % DIRECTIONS.len()],
        )
    }));

    let rule = if input.defender_wins {
        TieRule::Defender
    } else {
        TieRule::Mover
    };
    let before: u64 = grid.iter().map(|c| u64::from(c.strength)).sum();
    let mut after = grid.clone();
    let summary = TurnSimulator::new(rule).apply(&mut after, &moves, false);
    let total: u64 = after.iter().map(|c| u64::from(c.strength)).sum();

    assert!(total <= before, "strength created: {before} -> {total}");
    assert!(summary.moved + summary.downgraded <= moves.len());
});
