use crate::game::game_state::{pit_range, Action, GameState};
use crate::game::is_terminated::is_terminated;
use crate::{MancalaError, Result};

/// Non-empty pits of the player to move, in ascending board order.
/// Only empty for terminal states.
pub fn valid_actions(state: &GameState) -> Vec<Action> {
    pit_range(state.turn)
        .filter(|&position| state.board[position] > 0)
        .map(Action)
        .collect()
}

/// Non-panicking legality check used before applying externally supplied moves
pub fn check_action(state: &GameState, action: Action) -> Result<()> {
    if is_terminated(state) {
        return Err(MancalaError::GameOver);
    }
    if !pit_range(state.turn).contains(&action.position()) || state.board[action.position()] == 0 {
        return Err(MancalaError::IllegalAction {
            action: action.position(),
            player: state.turn.id(),
        });
    }
    Ok(())
}
