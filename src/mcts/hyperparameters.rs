//! Search Hyperparameters Configuration
//!
//! This module defines the tunable parameters of the rollout evaluators and of
//! the UCT tree search, together with their validation. Invalid combinations
//! are rejected when an evaluator or tree is built, never during a search.

use crate::{MancalaError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Rollout evaluator hyperparameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RolloutHyperparameters {
    /// Simulations run for each candidate first action
    /// Default: 1000
    pub num_samples: usize,

    /// Maximum plies per simulation for truncated (heuristic) rollouts,
    /// the forced first action included. Ignored by full random rollouts.
    /// Default: 4
    pub horizon: usize,

    /// Evaluate candidate actions on the rayon thread pool
    /// Default: false
    pub parallel: bool,

    /// Seed for reproducible evaluations; fresh OS entropy when `None`
    pub seed: Option<u64>,
}

impl Default for RolloutHyperparameters {
    fn default() -> Self {
        Self {
            num_samples: 1000,
            horizon: 4,
            parallel: false,
            seed: None,
        }
    }
}

impl RolloutHyperparameters {
    pub fn validate(&self) -> Result<()> {
        if self.num_samples == 0 {
            return Err(MancalaError::Config(
                "num_samples must be at least 1".to_string(),
            ));
        }
        if self.horizon == 0 {
            return Err(MancalaError::Config("horizon must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Create a configuration string for logging
    pub fn to_config_string(&self) -> String {
        format!(
            "samples[{}]_horizon[{}]_parallel[{}]",
            self.num_samples, self.horizon, self.parallel
        )
    }
}

/// When a tree search stops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchBudget {
    /// Keep running whole iterations until the wall-clock budget is spent
    Time(Duration),
    /// Run exactly this many iterations
    Iterations(u32),
}

impl SearchBudget {
    /// Exactly one of the two limits must be given.
    pub fn from_limits(time_limit_ms: Option<u64>, iteration_limit: Option<u32>) -> Result<Self> {
        match (time_limit_ms, iteration_limit) {
            (Some(_), Some(_)) => Err(MancalaError::ConflictingBudgets),
            (None, None) => Err(MancalaError::MissingBudget),
            (Some(ms), None) => Ok(SearchBudget::Time(Duration::from_millis(ms))),
            (None, Some(n)) if n < 1 => Err(MancalaError::InvalidIterationLimit(n)),
            (None, Some(n)) => Ok(SearchBudget::Iterations(n)),
        }
    }
}

/// UCT tree search hyperparameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UctHyperparameters {
    /// Wall-clock budget per search in milliseconds
    /// Default: 1000
    pub time_limit_ms: Option<u64>,

    /// Iterations per search (exclusive with `time_limit_ms`)
    /// Default: None
    pub iteration_limit: Option<u32>,

    /// Weight of the UCB1 exploration term
    /// Default: 1/sqrt(2)
    pub exploration_weight: f64,

    /// Weight of the mean-reward term
    /// Default: 1.0
    pub exploitation_weight: f64,

    /// Seed for tie-breaking and rollouts; fresh OS entropy when `None`
    pub seed: Option<u64>,
}

impl Default for UctHyperparameters {
    fn default() -> Self {
        Self {
            time_limit_ms: Some(1000),
            iteration_limit: None,
            exploration_weight: std::f64::consts::FRAC_1_SQRT_2,
            exploitation_weight: 1.0,
            seed: None,
        }
    }
}

impl UctHyperparameters {
    /// Iteration-bounded configuration with default weights
    pub fn with_iterations(iterations: u32) -> Self {
        Self {
            time_limit_ms: None,
            iteration_limit: Some(iterations),
            ..Self::default()
        }
    }

    /// Time-bounded configuration with default weights
    pub fn with_time_limit_ms(time_limit_ms: u64) -> Self {
        Self {
            time_limit_ms: Some(time_limit_ms),
            iteration_limit: None,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the weights and resolves the budget
    pub fn budget(&self) -> Result<SearchBudget> {
        if !self.exploration_weight.is_finite() || self.exploration_weight < 0.0 {
            return Err(MancalaError::Config(format!(
                "exploration_weight must be a non-negative number, got {}",
                self.exploration_weight
            )));
        }
        if !self.exploitation_weight.is_finite() {
            return Err(MancalaError::Config(format!(
                "exploitation_weight must be finite, got {}",
                self.exploitation_weight
            )));
        }
        SearchBudget::from_limits(self.time_limit_ms, self.iteration_limit)
    }

    /// Create a configuration string for logging
    pub fn to_config_string(&self) -> String {
        let budget = match (self.time_limit_ms, self.iteration_limit) {
            (Some(ms), _) => format!("time[{}ms]", ms),
            (None, Some(n)) => format!("iterations[{}]", n),
            (None, None) => "budget[none]".to_string(),
        };
        format!(
            "{}_explore[{:.3}]_exploit[{:.2}]",
            budget, self.exploration_weight, self.exploitation_weight
        )
    }
}
