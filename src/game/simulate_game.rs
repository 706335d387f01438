use crate::game::game_state::{Action, GameState};
use crate::game::get_legal_moves::valid_actions;
use crate::game::is_terminated::is_terminated;
use crate::game::next_state::next_state;
use crate::strategy::rollout_policy::RolloutPolicy;
use rand::rngs::StdRng;

/// Plays `first_action` from `state`, then lets `policy` pick moves until the
/// game ends or `max_plies` moves (the forced first one included) were played.
/// Returns the state the simulation stopped in.
pub fn simulate_game(
    state: &GameState,
    first_action: Action,
    policy: &dyn RolloutPolicy,
    max_plies: Option<usize>,
    rng: &mut StdRng,
) -> GameState {
    let mut current = next_state(state, first_action);
    let mut plies = 1;

    while !is_terminated(&current) && max_plies.map_or(true, |limit| plies < limit) {
        let actions = valid_actions(&current);
        let action = policy.choose_action(&current, &actions, rng);
        current = next_state(&current, action);
        plies += 1;
    }

    current
}

/// Policy-driven playout from `state` to the end of the game
pub fn simulate_to_end(state: &GameState, policy: &dyn RolloutPolicy, rng: &mut StdRng) -> GameState {
    let mut current = *state;
    while !is_terminated(&current) {
        let actions = valid_actions(&current);
        let action = policy.choose_action(&current, &actions, rng);
        current = next_state(&current, action);
    }
    current
}
