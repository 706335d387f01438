//! Pure Monte Carlo rollouts.
//!
//! Each candidate action is played once, then the rollout policy finishes the
//! game. The payout is 1 for a win of the player who decides and 0 otherwise;
//! a tie scores like a loss here.

use crate::game::game_state::{Action, GameState};
use crate::game::is_terminated::is_terminated;
use crate::game::simulate_game::simulate_game;
use crate::mcts::hyperparameters::RolloutHyperparameters;
use crate::mcts::mcts_result::ActionEvaluation;
use crate::mcts::rollout_evaluator::evaluate_candidates;
use crate::scoring::scoring::winner;
use crate::strategy::rollout_policy::{RolloutPolicy, UniformRandomPolicy};
use crate::utils::rng::make_rng;
use crate::Result;
use rand::rngs::StdRng;

pub struct RandomRolloutEvaluator {
    params: RolloutHyperparameters,
    policy: Box<dyn RolloutPolicy>,
    rng: StdRng,
}

impl RandomRolloutEvaluator {
    /// Evaluator with the uniform random rollout policy
    pub fn new(params: RolloutHyperparameters) -> Result<Self> {
        Self::with_policy(params, Box::new(UniformRandomPolicy))
    }

    pub fn with_policy(params: RolloutHyperparameters, policy: Box<dyn RolloutPolicy>) -> Result<Self> {
        params.validate()?;
        let rng = make_rng(params.seed);
        Ok(Self { params, policy, rng })
    }

    pub fn params(&self) -> &RolloutHyperparameters {
        &self.params
    }

    /// Win-rate estimate for every valid action of the player to move.
    /// `None` for a finished game.
    pub fn evaluate(&mut self, state: &GameState) -> Option<ActionEvaluation> {
        let policy = self.policy.as_ref();
        let evaluation = evaluate_candidates(state, &self.params, &mut self.rng, |action, rng| {
            rollout_payout(state, action, policy, rng)
        })?;

        log::debug!(
            "random rollouts ({}): {:?}",
            self.params.to_config_string(),
            evaluation.mean_payouts
        );
        Some(evaluation)
    }
}

/// One full simulation starting with `action`: 1 if the mover wins, else 0
pub fn rollout_payout(
    state: &GameState,
    action: Action,
    policy: &dyn RolloutPolicy,
    rng: &mut StdRng,
) -> f64 {
    let final_state = simulate_game(state, action, policy, None, rng);
    assert!(is_terminated(&final_state), "full rollout stopped early");
    if winner(&final_state).is_win_for(state.turn) {
        1.0
    } else {
        0.0
    }
}
