use crate::game::game_state::Action;

/// Outcome of a rollout evaluation of every candidate first action
#[derive(Debug, Clone, PartialEq)]
pub struct ActionEvaluation {
    /// First action with the highest mean payout
    pub best_action: Action,
    /// Mean payout of `best_action`
    pub best_value: f64,
    /// Mean payout per candidate, in `valid_actions` order
    pub mean_payouts: Vec<(Action, f64)>,
}

/// Summary of a finished tree search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchDetails {
    pub action: Action,
    /// Mean reward of the chosen child from the root player's point of view, in [-1, 1]
    pub expected_reward: f64,
    pub child_visits: u32,
    pub root_visits: u32,
    pub iterations: u32,
    pub tree_size: usize,
}

impl SearchDetails {
    /// Expected reward rescaled to a win probability in [0, 1]
    pub fn win_probability(&self) -> f64 {
        (self.expected_reward + 1.0) / 2.0
    }
}
