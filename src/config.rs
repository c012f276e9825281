//! Search configuration.
//!
//! Every option only trades search quality against latency; none of them
//! affects the legality of the returned move.

use std::time::Duration;

use crate::constants::{EXPLORATION, MAX_NODES, N_SIMS, SEARCH_RADIUS, TIME_BUDGET_MS};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("exploration weight must be finite and non-negative (got {0})")]
    InvalidExploration(f64),
    #[error("node budget must be at least 1")]
    ZeroNodeBudget,
}

/// Parameters of one move search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Maximum driver iterations
    pub max_iterations: usize,
    /// UCT exploration weight
    pub exploration: f64,
    /// Wall-clock budget, checked between iterations
    pub time_budget: Duration,
    /// Candidate radius around the last move
    pub radius: usize,
    /// Cap on tree nodes
    pub max_nodes: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: N_SIMS,
            exploration: EXPLORATION,
            time_budget: Duration::from_millis(TIME_BUDGET_MS),
            radius: SEARCH_RADIUS,
            max_nodes: MAX_NODES,
        }
    }
}

impl SearchConfig {
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }

    pub fn with_radius(mut self, radius: usize) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_max_nodes(mut self, n: usize) -> Self {
        self.max_nodes = n;
        self
    }

    /// Reject settings the driver cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(ConfigError::InvalidExploration(self.exploration));
        }
        if self.max_nodes == 0 {
            return Err(ConfigError::ZeroNodeBudget);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = SearchConfig::default();
        assert_eq!(cfg.max_iterations, 789);
        assert_eq!(cfg.exploration, 4.2);
        assert_eq!(cfg.time_budget, Duration::from_millis(3000));
        assert_eq!(cfg.radius, 1);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        let cfg = SearchConfig::default().with_exploration(f64::NAN);
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidExploration(_))
        ));
        let cfg = SearchConfig::default().with_exploration(-1.0);
        assert!(cfg.validate().is_err());
        let cfg = SearchConfig::default().with_max_nodes(0);
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroNodeBudget));
    }
}
