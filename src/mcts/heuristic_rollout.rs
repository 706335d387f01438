//! Truncated Monte Carlo rollouts scored with a heuristic readout.
//!
//! Each simulation plays the candidate action and then at most `horizon - 1`
//! policy moves. A simulation that reaches the end of the game pays 1 / 0.5 / 0
//! for a win / tie / loss; otherwise the heuristic scores the change from the
//! starting state, signed so that positive values favour the player to move.

use crate::game::game_state::{Action, GameState};
use crate::game::is_terminated::is_terminated;
use crate::game::player::Outcome;
use crate::game::simulate_game::simulate_game;
use crate::mcts::hyperparameters::RolloutHyperparameters;
use crate::mcts::mcts_result::ActionEvaluation;
use crate::mcts::rollout_evaluator::evaluate_candidates;
use crate::scoring::scoring::winner;
use crate::strategy::heuristic::{Heuristic, ReadoutWeights};
use crate::strategy::rollout_policy::{RolloutPolicy, UniformRandomPolicy};
use crate::utils::rng::make_rng;
use crate::Result;
use rand::rngs::StdRng;

pub struct HeuristicRolloutEvaluator {
    params: RolloutHyperparameters,
    heuristic: Box<dyn Heuristic>,
    policy: Box<dyn RolloutPolicy>,
    rng: StdRng,
}

impl HeuristicRolloutEvaluator {
    /// Score-difference readout with uniform random rollouts
    pub fn new(params: RolloutHyperparameters) -> Result<Self> {
        Self::with_heuristic(params, Box::new(ReadoutWeights::initial()))
    }

    pub fn with_heuristic(params: RolloutHyperparameters, heuristic: Box<dyn Heuristic>) -> Result<Self> {
        Self::with_strategies(params, heuristic, Box::new(UniformRandomPolicy))
    }

    pub fn with_strategies(
        params: RolloutHyperparameters,
        heuristic: Box<dyn Heuristic>,
        policy: Box<dyn RolloutPolicy>,
    ) -> Result<Self> {
        params.validate()?;
        let rng = make_rng(params.seed);
        Ok(Self {
            params,
            heuristic,
            policy,
            rng,
        })
    }

    pub fn params(&self) -> &RolloutHyperparameters {
        &self.params
    }

    /// Mean payout for every valid action of the player to move.
    /// `None` for a finished game.
    pub fn evaluate(&mut self, state: &GameState) -> Option<ActionEvaluation> {
        let horizon = self.params.horizon;
        let policy = self.policy.as_ref();
        let heuristic = self.heuristic.as_ref();
        let evaluation = evaluate_candidates(state, &self.params, &mut self.rng, |action, rng| {
            let final_state = simulate_game(state, action, policy, Some(horizon), rng);
            truncated_payout(state, &final_state, heuristic)
        })?;

        log::debug!(
            "heuristic rollouts ({}): {:?}",
            self.params.to_config_string(),
            evaluation.mean_payouts
        );
        Some(evaluation)
    }
}

/// Payout of a simulation that started in `start` and stopped in `end`,
/// seen by the player who was to move in `start`
pub fn truncated_payout(start: &GameState, end: &GameState, heuristic: &dyn Heuristic) -> f64 {
    let mover = start.turn;
    if is_terminated(end) {
        match winner(end) {
            Outcome::Winner(player) if player == mover => 1.0,
            Outcome::Tie => 0.5,
            Outcome::Winner(_) => 0.0,
        }
    } else {
        mover.sign() * heuristic.evaluate(start, end)
    }
}
