// Allow unwrap and float comparisons in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::float_cmp))]
//! Frontier: a simulation-driven expansion planner for toroidal territory
//! games (Halite v1 rules).
//!
//! Each turn the engine chooses a move for every cell a player owns. Before
//! the first turn it runs speculative games on copies of the map to pick a
//! long-horizon expansion target, then follows a corridor toward it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Arena / CLI      (GameClient)     │
//! ├─────────────────────────────────────┤
//! │   Campaign planner                  │
//! ├──────────────────┬──────────────────┤
//! │   Move policy    │  Turn simulator  │
//! ├──────────────────┴──────────────────┤
//! │   Heuristic  ·  Pathfinder          │
//! ├─────────────────────────────────────┤
//! │   Toroidal grid                     │
//! └─────────────────────────────────────┘
//! ```

pub mod arena;
pub mod campaign;
pub mod client;
pub mod config;
pub mod error;
pub mod grid;
pub mod heuristic;
pub mod path;
pub mod policy;
pub mod sim;

pub use error::{ConfigError, PlanError, RunError};

// Re-export key types at crate root for convenience
pub use campaign::{Campaign, PlanReport};
pub use client::GameClient;
pub use config::PlannerConfig;
pub use grid::{Cell, Coord, Direction, Grid, Move, OwnerId};
pub use policy::{MoveSelector, Target};
pub use sim::{SimulationScore, TieRule, TurnSimulator};
