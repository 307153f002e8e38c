//! Tuning parameters for the exploration and escape heuristics.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Largest number of top-value waypoints the escape planner tries first.
pub const DEFAULT_MAX_WAYPOINTS: usize = 20;

/// Deepest diversion search the escape planner runs.
pub const DEFAULT_MAX_DIVERSION_DEPTH: usize = 16;

/// Weight applied to a node's distance-to-target hint when choosing where to
/// explore next.
pub const DEFAULT_DISTANCE_WEIGHT: f64 = 1.1;

/// Configuration for both phases.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    pub escape: EscapeConfig,
    pub explore: ExploreConfig,
}

impl StrategyConfig {
    pub fn validate(&self) -> Result<()> {
        self.explore.validate()
    }
}

/// Escape heuristic configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscapeConfig {
    /// Upper bound on the number of top-value nodes routed through.
    pub max_waypoints: usize,
    /// Diversion depths `1..=max_diversion_depth` are tried; 0 disables diversions.
    pub max_diversion_depth: usize,
}

impl Default for EscapeConfig {
    fn default() -> Self {
        Self {
            max_waypoints: DEFAULT_MAX_WAYPOINTS,
            max_diversion_depth: DEFAULT_MAX_DIVERSION_DEPTH,
        }
    }
}

/// Exploration heuristic configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExploreConfig {
    /// Multiplier on the distance-to-target estimate of a candidate node.
    pub distance_weight: f64,
    /// Abort exploration after this many moves.
    pub max_steps: Option<usize>,
}

impl Default for ExploreConfig {
    fn default() -> Self {
        Self {
            distance_weight: DEFAULT_DISTANCE_WEIGHT,
            max_steps: None,
        }
    }
}

impl ExploreConfig {
    /// Validate the exploration configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.distance_weight.is_finite() {
            return Err(Error::InvalidConfig {
                message: "distance_weight must be finite".to_string(),
            });
        }

        if self.distance_weight < 0.0 {
            return Err(Error::InvalidConfig {
                message: format!(
                    "distance_weight must not be negative, got {}",
                    self.distance_weight
                ),
            });
        }

        Ok(())
    }
}
