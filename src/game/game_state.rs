use crate::game::player::Player;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pits per side
pub const PITS_PER_SIDE: usize = 6;
/// Stones in every pit at the start of a game
pub const STONES_PER_PIT: u8 = 4;
/// Number of stone-holding positions (12 pits + 2 stores)
pub const BOARD_SIZE: usize = 14;
/// Stone count that every reachable state must preserve
pub const TOTAL_STONES: u32 = (2 * PITS_PER_SIDE as u32) * STONES_PER_PIT as u32;

// Board layout:
//   0..=5  player one pits   6  player one store
//   7..=12 player two pits  13  player two store

/// Absolute board index of a player's store
pub fn store_index(player: Player) -> usize {
    match player {
        Player::One => 6,
        Player::Two => 13,
    }
}

/// Absolute board indices of a player's six pits, in sowing order
pub fn pit_range(player: Player) -> std::ops::Range<usize> {
    match player {
        Player::One => 0..6,
        Player::Two => 7..13,
    }
}

/// Owner of a pit, or `None` for the two stores
pub fn pit_owner(position: usize) -> Option<Player> {
    match position {
        0..=5 => Some(Player::One),
        7..=12 => Some(Player::Two),
        _ => None,
    }
}

/// Pit directly across the board. Only defined for pits, not stores.
pub fn opposite_pit(position: usize) -> usize {
    debug_assert!(pit_owner(position).is_some(), "stores have no opposite pit");
    12 - position
}

/// A move: the absolute board index of one of the mover's pits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Action(pub usize);

impl Action {
    /// Absolute board index of the pit
    pub fn position(self) -> usize {
        self.0
    }

    /// Pit number 0-5 counted from the owner's first pit
    pub fn relative_pit(self) -> usize {
        if self.0 > 6 {
            self.0 - 7
        } else {
            self.0
        }
    }

    /// Builds the action for `player`'s pit number `pit` (0-5)
    pub fn from_relative(player: Player, pit: usize) -> Action {
        assert!(pit < PITS_PER_SIDE, "pit {} out of range", pit);
        Action(pit_range(player).start + pit)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable snapshot of the game: 14 stone counts and the player to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    pub board: [u8; BOARD_SIZE],
    pub turn: Player,
}

impl GameState {
    pub fn new(board: [u8; BOARD_SIZE], turn: Player) -> Self {
        GameState { board, turn }
    }

    pub fn stones(&self, position: usize) -> u8 {
        self.board[position]
    }

    pub fn store(&self, player: Player) -> u8 {
        self.board[store_index(player)]
    }

    /// Sum over all 14 positions
    pub fn total_stones(&self) -> u32 {
        self.board.iter().map(|&s| s as u32).sum()
    }

    /// Stones remaining in `player`'s pits (store excluded)
    pub fn stones_in_pits(&self, player: Player) -> u32 {
        self.board[pit_range(player)].iter().map(|&s| s as u32).sum()
    }

    /// Elementwise `other - self` over the 14 board fields
    pub fn board_difference(&self, other: &GameState) -> [f64; BOARD_SIZE] {
        let mut diff = [0.0; BOARD_SIZE];
        for (i, d) in diff.iter_mut().enumerate() {
            *d = other.board[i] as f64 - self.board[i] as f64;
        }
        diff
    }
}

impl Default for GameState {
    fn default() -> Self {
        initial_state()
    }
}

/// Opening position: four stones per pit, empty stores, player one to move
pub fn initial_state() -> GameState {
    let mut board = [STONES_PER_PIT; BOARD_SIZE];
    board[store_index(Player::One)] = 0;
    board[store_index(Player::Two)] = 0;
    GameState::new(board, Player::One)
}
