pub mod algorithm;
pub mod heuristic_rollout;
pub mod hyperparameters;
pub mod mcts_result;
pub mod node;
pub mod random_rollout;
pub mod rollout_evaluator;
pub mod selection;
