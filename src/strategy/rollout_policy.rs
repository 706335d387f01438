use crate::game::game_state::{Action, GameState};
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;

/// Move selector used inside simulations, never for the real move.
///
/// `actions` is the non-empty list of valid actions for `state`.
pub trait RolloutPolicy: Send + Sync {
    fn choose_action(&self, state: &GameState, actions: &[Action], rng: &mut StdRng) -> Action;
}

/// Picks any valid action with equal probability
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformRandomPolicy;

impl RolloutPolicy for UniformRandomPolicy {
    fn choose_action(&self, _state: &GameState, actions: &[Action], rng: &mut StdRng) -> Action {
        *actions
            .choose(rng)
            .expect("rollout policy called without valid actions")
    }
}

impl<F> RolloutPolicy for F
where
    F: Fn(&GameState, &[Action], &mut StdRng) -> Action + Send + Sync,
{
    fn choose_action(&self, state: &GameState, actions: &[Action], rng: &mut StdRng) -> Action {
        self(state, actions, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::game_state::initial_state;
    use crate::game::get_legal_moves::valid_actions;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_uniform_policy_only_returns_valid_actions() {
        let state = initial_state();
        let actions = valid_actions(&state);
        let mut rng = StdRng::seed_from_u64(7);

        let seen: HashSet<Action> = (0..200)
            .map(|_| UniformRandomPolicy.choose_action(&state, &actions, &mut rng))
            .collect();

        assert!(seen.iter().all(|a| actions.contains(a)));
        assert_eq!(seen.len(), actions.len(), "200 draws should cover all 6 pits");
    }

    #[test]
    fn test_closure_policy() {
        let first = |_: &GameState, actions: &[Action], _: &mut StdRng| actions[0];
        let mut rng = StdRng::seed_from_u64(0);
        let state = initial_state();
        assert_eq!(
            first.choose_action(&state, &valid_actions(&state), &mut rng),
            Action(0)
        );
    }
}
