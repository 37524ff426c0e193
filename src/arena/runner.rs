//! Local multi-player game runner.

use std::cmp::Reverse;
use std::time::Instant;

use tracing::{debug, info};

use crate::arena::{ArenaConfig, ArenaError, GameResult, PlayerResult, generate_grid};
use crate::campaign::Campaign;
use crate::grid::Grid;
use crate::sim::{TurnSimulator, score};

/// Play one game between `config.players` copies of the planner.
///
/// Every player plans a campaign on the initial map. Each turn, all players
/// still holding cells choose their moves on the same snapshot; the combined
/// batch is then applied in one simulator step. The game ends when at most
/// one player holds cells or after `config.max_turns` turns.
///
/// # Errors
///
/// Returns an error if the map cannot be generated or the planner config is
/// invalid.
pub fn run_game(seed: u64, config: &ArenaConfig) -> Result<GameResult, ArenaError> {
    let mut grid = generate_grid(seed, config.width, config.height, config.players)?;
    let simulator = TurnSimulator::new(config.planner.tie_rule);

    let mut campaigns = Vec::with_capacity(usize::from(config.players));
    for owner in 1..=config.players {
        campaigns.push(Campaign::plan(&grid, owner, &config.planner, Instant::now())?);
    }
    let mut eliminated: Vec<Option<u32>> = vec![None; campaigns.len()];

    let mut turns = 0;
    while turns < config.max_turns && alive(&grid, config.players) > 1 {
        let snapshot = grid.clone();
        let mut moves = Vec::new();
        for campaign in &mut campaigns {
            if snapshot.owned_by(campaign.owner()).next().is_some() {
                moves.extend(campaign.next_moves(&snapshot));
            }
        }
        simulator.apply(&mut grid, &moves, true);
        turns += 1;

        for (slot, campaign) in eliminated.iter_mut().zip(&campaigns) {
            if slot.is_none() && grid.owned_by(campaign.owner()).next().is_none() {
                debug!(seed, owner = campaign.owner(), turn = turns, "player eliminated");
                *slot = Some(turns);
            }
        }
    }

    let players: Vec<PlayerResult> = campaigns
        .iter()
        .zip(eliminated)
        .map(|(campaign, eliminated_turn)| PlayerResult {
            owner: campaign.owner(),
            score: score(&grid, campaign.owner()),
            eliminated_turn,
            plan: *campaign.report(),
        })
        .collect();
    let winner = players
        .iter()
        .filter(|player| player.score.territory > 0)
        .max_by_key(|player| {
            (
                player.score.territory,
                player.score.production,
                player.score.strength,
                Reverse(player.owner),
            )
        })
        .map(|player| player.owner);

    info!(seed, turns, ?winner, "game finished");
    Ok(GameResult {
        seed,
        turns_played: turns,
        winner,
        players,
    })
}

fn alive(grid: &Grid, players: u8) -> usize {
    (1..=players)
        .filter(|&owner| grid.owned_by(owner).next().is_some())
        .count()
}
