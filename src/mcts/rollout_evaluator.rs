//! Flat Monte Carlo evaluation shared by the random and heuristic rollout evaluators.
//!
//! Every candidate first action gets its own generator, seeded from the
//! evaluator's generator in candidate order. Sequential and parallel runs with
//! the same seed therefore produce the same mean payouts.

use crate::game::game_state::{Action, GameState};
use crate::game::get_legal_moves::valid_actions;
use crate::mcts::hyperparameters::RolloutHyperparameters;
use crate::mcts::mcts_result::ActionEvaluation;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Mean of `payout` over `num_samples` draws for each valid action, then the
/// stable argmax. Returns `None` when there is nothing to choose from.
pub(crate) fn evaluate_candidates<F>(
    state: &GameState,
    params: &RolloutHyperparameters,
    rng: &mut StdRng,
    payout: F,
) -> Option<ActionEvaluation>
where
    F: Fn(Action, &mut StdRng) -> f64 + Sync,
{
    let actions = valid_actions(state);
    if actions.is_empty() {
        return None;
    }

    let seeds: Vec<u64> = actions.iter().map(|_| rng.random()).collect();
    let mean_payout = |(action, seed): (&Action, &u64)| {
        let mut local_rng = StdRng::seed_from_u64(*seed);
        let total: f64 = (0..params.num_samples)
            .map(|_| payout(*action, &mut local_rng))
            .sum();
        total / params.num_samples as f64
    };

    let means: Vec<f64> = if params.parallel {
        actions.par_iter().zip(seeds.par_iter()).map(mean_payout).collect()
    } else {
        actions.iter().zip(seeds.iter()).map(mean_payout).collect()
    };

    // strict comparison keeps the first of equal means
    let mut best = 0;
    for (i, &mean) in means.iter().enumerate() {
        if mean > means[best] {
            best = i;
        }
    }

    Some(ActionEvaluation {
        best_action: actions[best],
        best_value: means[best],
        mean_payouts: actions.into_iter().zip(means).collect(),
    })
}
