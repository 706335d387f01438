//! Rule invariants checked over many random games

use mancala_mcts::game::game_state::{
    initial_state, pit_owner, pit_range, store_index, GameState, TOTAL_STONES,
};
use mancala_mcts::game::get_legal_moves::valid_actions;
use mancala_mcts::game::is_terminated::is_terminated;
use mancala_mcts::game::next_state::sow;
use mancala_mcts::game::player::{Outcome, Player};
use mancala_mcts::scoring::scoring::{scores, winner};
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Plays one uniformly random game and checks every transition on the way
fn random_walk(seed: u64) -> GameState {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut state = initial_state();
    while !is_terminated(&state) {
        let actions = valid_actions(&state);
        assert!(!actions.is_empty());
        assert!(actions.windows(2).all(|w| w[0] < w[1]), "actions must be ascending");
        assert!(actions
            .iter()
            .all(|a| pit_owner(a.position()) == Some(state.turn) && state.board[a.position()] > 0));

        let &action = actions.choose(&mut rng).unwrap();
        let sowing = sow(&state, action);
        let next = sowing.state;
        let mover = state.turn;

        assert_eq!(next.total_stones(), TOTAL_STONES);
        assert_ne!(
            sowing.last_position,
            store_index(mover.opponent()),
            "the opponent's store is never sown into"
        );
        assert_eq!(next.store(mover.opponent()), state.store(mover.opponent()));

        // extra turn exactly when the last stone lands in the mover's store
        assert_eq!(sowing.extra_turn, sowing.last_position == store_index(mover));
        if sowing.extra_turn {
            assert_eq!(next.turn, mover);
        } else {
            assert_eq!(next.turn, mover.opponent());
        }

        // captures empty the landing pit and its opposite
        if sowing.captured > 0 {
            assert!(pit_range(mover).contains(&sowing.last_position));
            assert_eq!(next.board[sowing.last_position], 0);
            assert_eq!(next.board[12 - sowing.last_position], 0);
            assert!(next.store(mover) >= state.store(mover) + sowing.captured);
        }

        state = next;
    }
    state
}

#[test]
fn test_random_games_preserve_the_rules() {
    for seed in 0..200 {
        let end = random_walk(seed);
        let (one, two) = scores(&end);
        assert_eq!(one + two, TOTAL_STONES);

        let either_side_empty =
            end.stones_in_pits(end.turn) == 0 || end.stones_in_pits(end.turn.opponent()) == 0;
        assert!(either_side_empty);

        let expected = if one > two {
            Outcome::Winner(Player::One)
        } else if two > one {
            Outcome::Winner(Player::Two)
        } else {
            Outcome::Tie
        };
        assert_eq!(winner(&end), expected);
    }
}
