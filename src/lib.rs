//! # Mancala MCTS Library
//!
//! Kalah (six pits and a store per side) with Monte Carlo decision engines.
//!
//! ## Features
//!
//! - **Game Engine**: Deterministic sowing, capture and extra-turn rules
//! - **Rollout Evaluators**: Full random rollouts and truncated rollouts scored by a heuristic
//! - **Tree Search**: UCT with a persistent, re-rooted search tree
//! - **Agents**: Interchangeable computer players and a match driver
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mancala_mcts::agents::agent::Agent;
//! use mancala_mcts::agents::play::play_game;
//! use mancala_mcts::mcts::hyperparameters::{RolloutHyperparameters, UctHyperparameters};
//!
//! let mut uct = Agent::uct("uct", &UctHyperparameters::with_iterations(500)).unwrap();
//! let mut mcr = Agent::random_rollout("mcr", RolloutHyperparameters::default()).unwrap();
//! let result = play_game(&mut uct, &mut mcr).unwrap();
//! println!("{}", result.outcome);
//! ```

// ============================================================================
// PUBLIC API MODULES
// ============================================================================

/// Core game logic and rules
pub mod game;

/// Monte Carlo rollout evaluators and UCT tree search
pub mod mcts;

/// Final scores and winner
pub mod scoring;

/// Rollout policies and heuristic readouts
pub mod strategy;

/// Computer players and the match driver
pub mod agents;

/// Utility functions and helpers
pub mod utils;

/// Logger setup shared by the binaries
pub mod logging;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use agents::agent::{Agent, AgentKind};
pub use agents::play::{play_game, MatchResult};
pub use game::environment::{Mancala, StepInfo, StepOutcome};
pub use game::game_state::{initial_state, Action, GameState};
pub use game::player::{Outcome, Player};
pub use mcts::algorithm::UctSearchTree;
pub use mcts::hyperparameters::{RolloutHyperparameters, SearchBudget, UctHyperparameters};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Main error type for the Mancala library
#[derive(Debug, thiserror::Error)]
pub enum MancalaError {
    #[error("Cannot have both a time limit and an iteration limit")]
    ConflictingBudgets,

    #[error("Must have either a time limit or an iteration limit")]
    MissingBudget,

    #[error("Iteration limit must be at least 1, got {0}")]
    InvalidIterationLimit(u32),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Illegal action {action} for player {player}")]
    IllegalAction { action: usize, player: u8 },

    #[error("The game is already over")]
    GameOver,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, MancalaError>;

// ============================================================================
// LIBRARY VERSION INFO
// ============================================================================

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
