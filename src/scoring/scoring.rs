use crate::game::game_state::{pit_range, store_index, GameState};
use crate::game::player::{Outcome, Player};

/// Stones on each side (pits plus store), as `(player one, player two)`
pub fn scores(state: &GameState) -> (u32, u32) {
    (side_total(state, Player::One), side_total(state, Player::Two))
}

fn side_total(state: &GameState, player: Player) -> u32 {
    state.board[pit_range(player)]
        .iter()
        .map(|&s| s as u32)
        .sum::<u32>()
        + state.board[store_index(player)] as u32
}

/// Side with the strictly larger total, or `Outcome::Tie`
pub fn winner(state: &GameState) -> Outcome {
    let (one, two) = scores(state);
    if one > two {
        Outcome::Winner(Player::One)
    } else if two > one {
        Outcome::Winner(Player::Two)
    } else {
        Outcome::Tie
    }
}
