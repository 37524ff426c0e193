//! Error types for planning and configuration.

use std::path::PathBuf;

use thiserror::Error;

use crate::grid::OwnerId;

/// Failures of the planning layer.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The player owns no cell, so there is nothing to plan from.
    #[error("player {owner} owns no cells")]
    NoOwnedCells {
        /// The player that was searched for.
        owner: OwnerId,
    },
    /// The planner could not be built from its config.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Failures of the live campaign loop.
#[derive(Debug, Error)]
pub enum RunError<E> {
    /// The game client failed to read a frame or deliver moves.
    #[error("game client failed: {0}")]
    Client(E),
    /// The planner could not be built from its config.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Invalid planner configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Heuristic recursion depth of zero.
    #[error("heuristic depth must be at least 1")]
    DepthZero,
    /// Heuristic recursion depth above the supported maximum.
    #[error("heuristic depth {depth} exceeds the maximum of {max}")]
    DepthTooLarge {
        /// Requested depth.
        depth: u8,
        /// Largest accepted depth.
        max: u8,
    },
    /// Lookahead decay outside the open interval (0, 1).
    #[error("alpha must lie strictly between 0 and 1, got {0}")]
    AlphaOutOfRange(f64),
    /// Combo chains need at least one link.
    #[error("combo chain length must be at least 1")]
    EmptyComboChain,
    /// The config file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The config file is not valid JSON for `PlannerConfig`.
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_error_display() {
        let err = PlanError::NoOwnedCells { owner: 3 };
        assert_eq!(err.to_string(), "player 3 owns no cells");

        let err = PlanError::from(ConfigError::EmptyComboChain);
        assert_eq!(err.to_string(), "combo chain length must be at least 1");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::DepthTooLarge { depth: 5, max: 3 };
        assert!(err.to_string().contains("exceeds the maximum of 3"));

        let err = ConfigError::AlphaOutOfRange(1.5);
        assert!(err.to_string().contains("1.5"));
    }
}
