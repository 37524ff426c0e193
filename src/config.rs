//! Planner configuration.
//!
//! Every tunable of the engine lives in [`PlannerConfig`]. Configs are plain
//! serde structs so they can be loaded from JSON; missing fields take their
//! default values. Validation converts the raw numbers into the bounded
//! runtime types used by the heuristic and the move policy.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::heuristic::{Depth, HeuristicEvaluator};
use crate::sim::TieRule;

/// Tunables for the campaign planner and move policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlannerConfig {
    /// Name announced to the game server.
    pub bot_name: String,
    /// Geometric decay of lookahead in the capture heuristic, in (0, 1).
    pub alpha: f64,
    /// Heuristic depth used to rank zero-strength attack targets.
    pub attack_depth: u8,
    /// Heuristic depth used to rank neighbors to capture.
    pub probe_depth: u8,
    /// Maximum number of links in a combo chain.
    pub combo_max_chain: u8,
    /// Minimum strength before a cell walks toward an owned target.
    pub direct_move_threshold: u8,
    /// Cells with `strength <= production * factor` stay to accumulate.
    pub accumulate_factor: u16,
    /// Candidates closer than this to an evaluated one are skipped.
    pub prune_radius: u32,
    /// Wall-clock budget for the campaign search, measured from process start.
    pub init_budget_ms: u64,
    /// Upper bound on simulated turns per speculative game.
    pub max_horizon: u32,
    /// Outcome of equal-strength combat.
    pub tie_rule: TieRule,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            bot_name: "frontier".to_string(),
            alpha: 0.99,
            attack_depth: 1,
            probe_depth: 2,
            combo_max_chain: 10,
            direct_move_threshold: 10,
            accumulate_factor: 5,
            prune_radius: 3,
            init_budget_ms: 10_000,
            max_horizon: 150,
            tie_rule: TieRule::Mover,
        }
    }
}

impl PlannerConfig {
    /// Parse and validate a config from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is out of range.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Check every bounded value.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range value found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        HeuristicEvaluator::new(0, self.alpha)?;
        Depth::new(self.attack_depth)?;
        Depth::new(self.probe_depth)?;
        if self.combo_max_chain == 0 {
            return Err(ConfigError::EmptyComboChain);
        }
        Ok(())
    }

    /// The campaign search budget.
    #[must_use]
    pub const fn init_budget(&self) -> Duration {
        Duration::from_millis(self.init_budget_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = PlannerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.init_budget(), Duration::from_secs(10));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = PlannerConfig::from_json(r#"{"alpha": 0.5, "max_horizon": 40}"#).unwrap();
        assert!((config.alpha - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.max_horizon, 40);
        assert_eq!(config.probe_depth, 2);
        assert_eq!(config.tie_rule, TieRule::Mover);
    }

    #[test]
    fn test_tie_rule_parses() {
        let config = PlannerConfig::from_json(r#"{"tie_rule": "defender"}"#).unwrap();
        assert_eq!(config.tie_rule, TieRule::Defender);
    }

    #[test]
    fn test_rejects_deep_heuristic() {
        let err = validate_with_probe_depth(4);
        assert!(matches!(err, Err(ConfigError::DepthTooLarge { depth: 4, max: 3 })));
    }

    #[test]
    fn test_rejects_bad_alpha() {
        let result = PlannerConfig::from_json(r#"{"alpha": 1.0}"#);
        assert!(matches!(result, Err(ConfigError::AlphaOutOfRange(_))));
    }

    #[test]
    fn test_rejects_unknown_field() {
        let result = PlannerConfig::from_json(r#"{"alhpa": 0.5}"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_rejects_empty_combo_chain() {
        let result = PlannerConfig::from_json(r#"{"combo_max_chain": 0}"#);
        assert!(matches!(result, Err(ConfigError::EmptyComboChain)));
    }

    fn validate_with_probe_depth(depth: u8) -> Result<(), ConfigError> {
        PlannerConfig {
            probe_depth: depth,
            ..PlannerConfig::default()
        }
        .validate()
    }
}
