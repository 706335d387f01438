use crate::game::game_state::GameState;
use crate::game::player::Player;

/// The game ends as soon as either side's six pits are all empty
pub fn is_terminated(state: &GameState) -> bool {
    state.stones_in_pits(Player::One) == 0 || state.stones_in_pits(Player::Two) == 0
}
