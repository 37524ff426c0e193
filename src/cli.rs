//! CLI command implementations for Frontier.

pub(crate) mod plan;
pub(crate) mod run;
pub(crate) mod tournament;

mod output;

use clap::ValueEnum;
use frontier::PlannerConfig;
use frontier::arena::{ArenaConfig, ArenaError};
use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Output format for the `run` and `plan` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Output format for the `tournament` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum TournamentFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// Map and planner options shared by every command.
#[derive(Debug, Clone)]
pub(crate) struct MapOptions {
    /// Random seed, or `None` for a time-based one.
    pub(crate) seed: Option<u64>,
    /// Map width in cells.
    pub(crate) width: u16,
    /// Map height in cells.
    pub(crate) height: u16,
    /// Number of players.
    pub(crate) players: u8,
    /// Planner config file.
    pub(crate) config: Option<PathBuf>,
}

impl MapOptions {
    /// The seed to use, drawing one from the clock if none was given.
    pub(crate) fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs() ^ u64::from(d.subsec_nanos()))
                .unwrap_or(42)
        })
    }

    /// Build the arena config, loading the planner config file if given.
    pub(crate) fn arena_config(&self) -> Result<ArenaConfig, CliError> {
        let planner = match &self.config {
            Some(path) => PlannerConfig::load(path)?,
            None => PlannerConfig::default(),
        };
        Ok(ArenaConfig {
            width: self.width,
            height: self.height,
            players: self.players,
            planner,
            ..ArenaConfig::default()
        })
    }
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<frontier::ConfigError> for CliError {
    fn from(e: frontier::ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<frontier::PlanError> for CliError {
    fn from(e: frontier::PlanError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ArenaError> for CliError {
    fn from(e: ArenaError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON serialization failed: {e}"))
    }
}
