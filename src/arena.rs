//! Offline arena for local games.
//!
//! Provides a pure function interface: `(seed, config) -> GameResult`.
//! The same seed and config always produce the same map, and the planner
//! only varies with the wall-clock budget of its campaign search.

mod local;
mod mapgen;
mod runner;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use local::LocalClient;
pub use mapgen::{MIN_TILE, generate_grid, tile_layout};
pub use runner::run_game;

use crate::campaign::PlanReport;
use crate::config::PlannerConfig;
use crate::error::PlanError;
use crate::grid::OwnerId;
use crate::sim::SimulationScore;

/// Configuration for an arena game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Map width in cells.
    pub width: u16,
    /// Map height in cells.
    pub height: u16,
    /// Number of players (2-6).
    pub players: u8,
    /// Maximum turns before the game ends.
    pub max_turns: u32,
    /// Planner settings shared by every player.
    pub planner: PlannerConfig,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 30,
            height: 30,
            players: 2,
            max_turns: 300,
            planner: PlannerConfig::default(),
        }
    }
}

/// Final state of one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayerResult {
    /// Player identifier.
    pub owner: OwnerId,
    /// Score at the end of the game.
    pub score: SimulationScore,
    /// Turn the player lost its last cell (None if it survived).
    pub eliminated_turn: Option<u32>,
    /// The player's campaign search.
    pub plan: PlanReport,
}

/// Final result of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// The seed used for this game.
    pub seed: u64,
    /// Total turns played.
    pub turns_played: u32,
    /// The surviving player with the most territory (None if nobody survived).
    pub winner: Option<OwnerId>,
    /// Per-player results, in player order.
    pub players: Vec<PlayerResult>,
}

/// Error type for arena operations.
#[derive(Debug, Error)]
pub enum ArenaError {
    /// No tile layout exists for this many players.
    #[error("unsupported player count {0} (expected 2-6)")]
    PlayerCount(u8),
    /// A player's tile would be smaller than the minimum.
    #[error("{width}x{height} map is too small for {players} players")]
    MapTooSmall {
        /// Requested width.
        width: u16,
        /// Requested height.
        height: u16,
        /// Requested player count.
        players: u8,
    },
    /// The map does not split evenly into player tiles.
    #[error("{width}x{height} map does not split into {cols}x{rows} equal tiles")]
    UnevenMap {
        /// Requested width.
        width: u16,
        /// Requested height.
        height: u16,
        /// Tiles across.
        cols: u16,
        /// Tiles down.
        rows: u16,
    },
    /// A player's campaign could not be planned.
    #[error("planning failed: {0}")]
    Plan(#[from] PlanError),
}
