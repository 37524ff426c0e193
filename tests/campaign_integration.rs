//! Integration tests for planning and playing campaigns end to end.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::collections::HashSet;
use std::io::Write;
use std::time::Instant;

use frontier::arena::{ArenaConfig, LocalClient, generate_grid, run_game};
use frontier::campaign::{Corridor, run};
use frontier::grid::{Cell, Coord, Direction, Grid, Move, NEUTRAL};
use frontier::path::shortest_path;
use frontier::sim::score;
use frontier::{
    Campaign, ConfigError, MoveSelector, PlanError, PlannerConfig, RunError, Target,
    TurnSimulator,
};

/// A planner config that keeps searches short.
fn quick_config() -> PlannerConfig {
    PlannerConfig {
        max_horizon: 20,
        init_budget_ms: 2_000,
        ..PlannerConfig::default()
    }
}

/// 5x5 map: the agent at (2,2) with strength 5, a lone enemy at (2,4) with
/// strength 3, everything else empty.
fn skirmish() -> Grid {
    let mut grid = Grid::new(5, 5).unwrap();
    grid.set(Cell::new(Coord::new(2, 2), 1, 5, 1));
    grid.set(Cell::new(Coord::new(2, 4), 2, 3, 0));
    grid
}

#[test]
fn test_skirmish_corridor_to_capture() {
    let grid = skirmish();
    let enemy = Coord::new(2, 4);
    let gap = Coord::new(2, 3);

    let path = shortest_path(&grid, enemy, None, None);
    assert_eq!(path.cost(gap), Some(3));
    // Every route out of the enemy cell pays its 3 strength once.
    assert_eq!(path.cost(Coord::new(2, 2)), Some(3));
    let route = path.reconstruct(Coord::new(2, 2)).unwrap();
    assert_eq!(route.last(), Some(&enemy));

    let corridor = Corridor::new(vec![gap, enemy]).unwrap();
    let (target, last) = corridor.assign(&grid, Coord::new(2, 2));
    assert_eq!(target, gap);
    assert!(!last);
    assert_eq!(corridor.target(), enemy);

    let selector = MoveSelector::from_config(1, &PlannerConfig::default()).unwrap();
    let moves = selector.select(&grid, Coord::new(2, 2), &HashSet::new(), Target::Cell(gap));
    assert_eq!(moves, vec![Move::new(Coord::new(2, 2), Direction::South)]);

    // Aimed at the enemy itself, no owned cell borders it, so no combo chain
    // forms and the cell waits.
    let waiting = selector.select(&grid, Coord::new(2, 2), &HashSet::new(), Target::Cell(enemy));
    assert_eq!(waiting, vec![Move::still(Coord::new(2, 2))]);

    // The step into the empty gap keeps all five strength.
    let sim = TurnSimulator::default();
    let mut grid = grid;
    sim.apply(&mut grid, &moves, false);
    assert_eq!(grid.cell(gap).owner, 1);
    assert_eq!(grid.cell(gap).strength, 5);
    assert_eq!(grid.cell(Coord::new(2, 2)).strength, 0);

    // Then 5 - 3 takes the enemy cell.
    let summary = sim.apply(&mut grid, &[Move::new(gap, Direction::South)], false);
    assert_eq!(summary.captures, 1);
    assert_eq!(grid.cell(enemy).owner, 1);
    assert_eq!(grid.cell(enemy).strength, 2);
    assert_eq!(grid.owned_by(2).count(), 0);
}

#[test]
fn test_run_against_local_client() {
    let grid = generate_grid(7, 20, 20, 2).unwrap();
    let mut client = LocalClient::new(grid, 40);

    let turns = run(&mut client, 1, &quick_config(), Instant::now()).unwrap();

    assert_eq!(turns, 40);
    assert_eq!(client.identity(), Some("frontier"));
    assert_eq!(client.submitted().len(), 40);
    // Nobody else moves, so player 1 only ever gains ground.
    assert!(score(client.grid(), 1).territory > 1);
    assert!(score(client.grid(), 2).territory <= 1);
    for batch in client.submitted() {
        assert!(batch.iter().all(|mv| mv.coord.x < 20 && mv.coord.y < 20));
    }
}

#[test]
fn test_run_idles_without_cells() {
    let grid = generate_grid(7, 20, 20, 2).unwrap();
    let before = grid.clone();
    let mut client = LocalClient::new(grid, 5);

    let turns = run(&mut client, 3, &quick_config(), Instant::now()).unwrap();

    assert_eq!(turns, 5);
    assert_eq!(client.identity(), Some("frontier"));
    assert!(client.submitted().iter().all(Vec::is_empty));
    // Only production moved the map.
    for (old, new) in before.iter().zip(client.grid().iter()) {
        assert_eq!(old.owner, new.owner);
    }
}

#[test]
fn test_run_rejects_bad_config() {
    let grid = generate_grid(7, 20, 20, 2).unwrap();
    let mut client = LocalClient::new(grid, 5);
    let config = PlannerConfig {
        alpha: 1.5,
        ..quick_config()
    };

    let err = run(&mut client, 1, &config, Instant::now()).unwrap_err();
    assert!(matches!(
        err,
        RunError::Config(ConfigError::AlphaOutOfRange(_))
    ));
    assert!(client.identity().is_none());
    assert!(client.submitted().is_empty());
}

#[test]
fn test_run_without_frames() {
    let mut client = LocalClient::new(Grid::new(3, 3).unwrap(), 0);
    let turns = run(&mut client, 1, &quick_config(), Instant::now());
    assert!(matches!(turns, Ok(0)));
}

#[test]
fn test_campaign_moves_stay_on_owned_cells() {
    let grid = generate_grid(11, 24, 12, 2).unwrap();
    let mut campaign = Campaign::plan(&grid, 2, &quick_config(), Instant::now()).unwrap();
    let report = campaign.report();
    assert_eq!(report.owner, 2);
    assert_eq!(grid.cell(report.start).owner, 2);
    assert!(report.nearest_enemy.is_some());
    assert!(report.frontier_size > 0);

    let moves = campaign.next_moves(&grid);
    assert!(!moves.is_empty());
    for mv in &moves {
        assert_eq!(grid.cell(mv.coord).owner, 2);
    }
}

#[test]
fn test_arena_game_four_players() {
    let config = ArenaConfig {
        width: 24,
        height: 24,
        players: 4,
        max_turns: 40,
        planner: quick_config(),
    };

    let result = run_game(99, &config).unwrap();

    assert_eq!(result.seed, 99);
    assert_eq!(result.players.len(), 4);
    assert!(result.turns_played <= 40);
    for (i, player) in result.players.iter().enumerate() {
        assert_eq!(usize::from(player.owner), i + 1);
        assert_eq!(player.eliminated_turn.is_some(), player.score.territory == 0);
    }
    let winner = result.winner.unwrap();
    let best = result
        .players
        .iter()
        .map(|p| p.score.territory)
        .max()
        .unwrap();
    assert_eq!(result.players[usize::from(winner) - 1].score.territory, best);

    // Same seed, same game.
    assert_eq!(run_game(99, &config).unwrap().players.len(), 4);
}

#[test]
fn test_arena_rejects_uneven_map() {
    let config = ArenaConfig {
        width: 25,
        height: 24,
        players: 2,
        ..ArenaConfig::default()
    };
    assert!(run_game(1, &config).is_err());
}

#[test]
fn test_arena_rejects_bad_planner() {
    let config = ArenaConfig {
        width: 12,
        height: 12,
        planner: PlannerConfig {
            combo_max_chain: 0,
            ..quick_config()
        },
        ..ArenaConfig::default()
    };
    let err = run_game(1, &config).unwrap_err();
    assert!(matches!(
        err,
        frontier::arena::ArenaError::Plan(PlanError::Config(ConfigError::EmptyComboChain))
    ));
}

#[test]
fn test_config_file_roundtrip() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "bot_name": "scout", "alpha": 0.5, "prune_radius": 5, "tie_rule": "defender" }}"#
    )
    .unwrap();

    let config = PlannerConfig::load(file.path()).unwrap();
    assert_eq!(config.bot_name, "scout");
    assert_eq!(config.prune_radius, 5);
    assert_eq!(config.tie_rule, frontier::TieRule::Defender);
    // Unlisted fields keep their defaults.
    assert_eq!(config.max_horizon, PlannerConfig::default().max_horizon);
}

#[test]
fn test_config_file_errors() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "alpha": 0.5, "aplha": 0.7 }}"#).unwrap();
    assert!(matches!(
        PlannerConfig::load(file.path()),
        Err(ConfigError::Parse(_))
    ));

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "attack_depth": 9 }}"#).unwrap();
    assert!(matches!(
        PlannerConfig::load(file.path()),
        Err(ConfigError::DepthTooLarge { depth: 9, .. })
    ));

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    assert!(matches!(
        PlannerConfig::load(&missing),
        Err(ConfigError::Io { .. })
    ));
}

#[test]
fn test_neutral_map_has_no_owner() {
    let grid = Grid::from_fn(6, 6, |_| (NEUTRAL, 4, 2)).unwrap();
    assert!(matches!(
        Campaign::plan(&grid, 1, &quick_config(), Instant::now()),
        Err(PlanError::NoOwnedCells { owner: 1 })
    ));
}
