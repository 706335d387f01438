pub mod heuristic;
pub mod rollout_policy;
