//! Campaign planning and the live turn loop.
//!
//! Before the first real turn the planner searches for a long-horizon
//! expansion target:
//! - follow a corridor toward the nearest enemy to fix the horizon `H`
//! - simulate `H` turns of pure local play for a baseline
//! - simulate `H` turns toward each promising frontier cell, best first,
//!   until the wall-clock budget runs out
//!
//! The winning corridor then guides the live game until it is exhausted.

mod corridor;
mod frontier;

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info, warn};

pub use corridor::{Corridor, TurnPlan, corridor_horizon, plan_turn, simulate};
pub use frontier::{frontier_cells, nearest_enemy};

use crate::client::GameClient;
use crate::config::PlannerConfig;
use crate::error::{PlanError, RunError};
use crate::grid::{Coord, Grid, Move, OwnerId};
use crate::path::shortest_path;
use crate::policy::MoveSelector;
use crate::sim::{SimulationScore, TurnSimulator, resolve_overflow, score};

/// Summary of a campaign search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlanReport {
    /// Player the campaign was planned for.
    pub owner: OwnerId,
    /// Owned cell every corridor starts from.
    pub start: Coord,
    /// Enemy cell used to fix the horizon, if any.
    pub nearest_enemy: Option<Coord>,
    /// Simulated turns per speculative game.
    pub horizon: u32,
    /// Score after `horizon` turns without a target.
    pub baseline: SimulationScore,
    /// Chosen expansion target, if any candidate beat the baseline.
    pub best_target: Option<Coord>,
    /// Score of the chosen target, or the baseline.
    pub best_score: SimulationScore,
    /// Cells in the committed corridor.
    pub corridor_len: usize,
    /// Cells in the frontier.
    pub frontier_size: usize,
    /// Candidates simulated.
    pub evaluated: usize,
    /// Candidates skipped for being near an evaluated one.
    pub pruned: usize,
    /// Candidates with no path through the frontier.
    pub unreachable: usize,
    /// Whether the search stopped on the budget.
    pub budget_exhausted: bool,
    /// Wall-clock time since `started`, in milliseconds.
    pub elapsed_ms: u64,
}

/// A planned campaign for one player.
#[derive(Debug, Clone)]
pub struct Campaign {
    selector: MoveSelector,
    corridor: Option<Corridor>,
    report: PlanReport,
}

impl Campaign {
    /// Search for the best expansion target from the initial grid.
    ///
    /// `started` is when the process (or match) started; the search stops
    /// before a candidate would push the total past `config.init_budget()`.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::NoOwnedCells`] if `owner` holds nothing, or a
    /// config error if the policy cannot be built.
    pub fn plan(
        grid: &Grid,
        owner: OwnerId,
        config: &PlannerConfig,
        started: Instant,
    ) -> Result<Self, PlanError> {
        let selector = MoveSelector::from_config(owner, config)?;
        let simulator = TurnSimulator::new(config.tie_rule);
        let start = grid
            .owned_by(owner)
            .next()
            .map(|cell| cell.coord)
            .ok_or(PlanError::NoOwnedCells { owner })?;

        let enemy = nearest_enemy(grid, owner, start);
        let horizon = enemy
            .and_then(|enemy| shortest_path(grid, enemy, Some(start), None).reconstruct(start))
            .and_then(Corridor::new)
            .map_or(config.max_horizon, |corridor| {
                corridor_horizon(grid, &selector, simulator, corridor, config.max_horizon)
            });

        let timer = Instant::now();
        let baseline = score(&simulate(grid, &selector, simulator, None, horizon), owner);
        let mut spent = timer.elapsed();
        let mut runs = 1_u32;
        info!(owner, horizon, ?baseline, "baseline simulated in {:?}", spent);

        let frontier = frontier_cells(grid, owner);
        let budget = config.init_budget();
        let mut best_target = None;
        let mut best_score = baseline;
        let mut reviewed: Vec<Coord> = Vec::new();
        let mut pruned = 0;
        let mut unreachable = 0;
        let mut budget_exhausted = false;

        for &candidate in &frontier {
            // Rolling average cost of one speculative game
            let estimate = spent / runs;
            if started.elapsed() + estimate > budget {
                budget_exhausted = true;
                warn!(
                    owner,
                    evaluated = reviewed.len(),
                    "search budget exhausted after {:?}",
                    started.elapsed()
                );
                break;
            }
            if reviewed
                .iter()
                .any(|&seen| grid.distance(candidate, seen) < config.prune_radius)
            {
                pruned += 1;
                continue;
            }
            let Some(path) =
                shortest_path(grid, candidate, Some(start), Some(frontier.as_slice())).reconstruct(start)
            else {
                unreachable += 1;
                continue;
            };

            let timer = Instant::now();
            let outcome = score(
                &simulate(grid, &selector, simulator, Corridor::new(path), horizon),
                owner,
            );
            debug!(x = candidate.x, y = candidate.y, ?outcome, "candidate simulated");
            if outcome.production > best_score.production {
                best_target = Some(candidate);
                best_score = outcome;
            }
            reviewed.push(candidate);
            spent += timer.elapsed();
            runs += 1;
        }

        let corridor = best_target
            .and_then(|target| {
                shortest_path(grid, target, Some(start), Some(frontier.as_slice())).reconstruct(start)
            })
            .and_then(Corridor::new);

        let report = PlanReport {
            owner,
            start,
            nearest_enemy: enemy,
            horizon,
            baseline,
            best_target,
            best_score,
            corridor_len: corridor.as_ref().map_or(0, |path| path.cells().len()),
            frontier_size: frontier.len(),
            evaluated: reviewed.len(),
            pruned,
            unreachable,
            budget_exhausted,
            elapsed_ms: millis(started.elapsed()),
        };
        info!(
            owner,
            best = ?report.best_target,
            production = report.best_score.production,
            evaluated = report.evaluated,
            "campaign planned"
        );

        Ok(Self {
            selector,
            corridor,
            report,
        })
    }

    /// The search summary.
    #[must_use]
    pub const fn report(&self) -> &PlanReport {
        &self.report
    }

    /// The corridor still being followed, if any.
    #[must_use]
    pub const fn corridor(&self) -> Option<&Corridor> {
        self.corridor.as_ref()
    }

    /// The player this campaign moves for.
    #[must_use]
    pub const fn owner(&self) -> OwnerId {
        self.selector.owner()
    }

    /// Moves for one live turn, after the overflow pass.
    pub fn next_moves(&mut self, grid: &Grid) -> Vec<Move> {
        let plan = plan_turn(grid, &self.selector, &mut self.corridor);
        if plan.corridor_finished {
            info!(owner = self.owner(), "corridor exhausted");
        }
        resolve_overflow(grid, &plan.moves)
    }
}

/// Drive a whole game through `client`.
///
/// Reads the initial frame, plans, announces `config.bot_name`, then plays
/// until the client reports the end of the game. A player with no cells at
/// the start idles and submits empty turns. Returns the number of turns
/// played.
///
/// # Errors
///
/// Returns an error if the client fails or the config is invalid.
pub fn run<C: GameClient>(
    client: &mut C,
    owner: OwnerId,
    config: &PlannerConfig,
    started: Instant,
) -> Result<u32, RunError<C::Error>> {
    let Some(initial) = client.read_frame().map_err(RunError::Client)? else {
        return Ok(0);
    };

    let mut campaign = match Campaign::plan(&initial, owner, config, started) {
        Ok(campaign) => Some(campaign),
        Err(PlanError::NoOwnedCells { .. }) => {
            warn!(owner, "no owned cells at start; idling");
            None
        }
        Err(PlanError::Config(err)) => return Err(RunError::Config(err)),
    };
    client
        .announce_identity(&config.bot_name)
        .map_err(RunError::Client)?;

    let mut turns = 0;
    while let Some(grid) = client.read_frame().map_err(RunError::Client)? {
        let moves = campaign
            .as_mut()
            .map(|campaign| campaign.next_moves(&grid))
            .unwrap_or_default();
        client.submit_moves(&moves).map_err(RunError::Client)?;
        turns += 1;
    }

    debug!(owner, turns, "game over");
    Ok(turns)
}

fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
