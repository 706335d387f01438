use crate::game::game_state::{
    opposite_pit, pit_owner, pit_range, store_index, Action, GameState, BOARD_SIZE, TOTAL_STONES,
};
use crate::game::is_terminated::is_terminated;

/// Everything a single move did to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sowing {
    /// Resulting state
    pub state: GameState,
    /// Absolute index where the last stone was dropped
    pub last_position: usize,
    /// Stones moved into the mover's store by a capture (0 when none happened)
    pub captured: u8,
    /// Mover plays again because the last stone reached their store
    pub extra_turn: bool,
}

/// Applies `action` for the player to move and reports how the move resolved.
///
/// # Panics
/// Panics when the game is over, when the pit is not the mover's, when the pit
/// is empty, or when the stone total is not preserved. Callers are expected to
/// draw actions from [`valid_actions`](crate::game::get_legal_moves::valid_actions).
pub fn sow(state: &GameState, action: Action) -> Sowing {
    assert!(!is_terminated(state), "no move is possible from a finished game: {:?}", state);
    let mover = state.turn;
    let start = action.position();
    assert!(
        pit_range(mover).contains(&start),
        "pit {} does not belong to player {}",
        start,
        mover
    );
    assert!(state.board[start] > 0, "pit {} is empty", start);

    let mut board = state.board;
    let skipped_store = store_index(mover.opponent());
    let own_store = store_index(mover);

    let mut remaining = board[start];
    board[start] = 0;
    let mut position = start;
    while remaining > 0 {
        position = (position + 1) % BOARD_SIZE;
        if position == skipped_store {
            continue;
        }
        board[position] += 1;
        remaining -= 1;
    }

    // Last stone in one of the mover's own pits that was empty: take it and the opposite pit
    let mut captured = 0;
    if pit_owner(position) == Some(mover) && board[position] == 1 {
        let opposite = opposite_pit(position);
        captured = board[opposite] + 1;
        board[own_store] += captured;
        board[position] = 0;
        board[opposite] = 0;
    }

    let extra_turn = position == own_store;
    let turn = if extra_turn { mover } else { mover.opponent() };
    let next = GameState::new(board, turn);

    assert_eq!(
        next.total_stones(),
        TOTAL_STONES,
        "stone total broken by action {} from {:?}",
        start,
        state
    );

    Sowing {
        state: next,
        last_position: position,
        captured,
        extra_turn,
    }
}

/// Pure transition function: the state after the player to move plays `action`.
///
/// # Panics
/// Same preconditions as [`sow`].
pub fn next_state(state: &GameState, action: Action) -> GameState {
    sow(state, action).state
}
