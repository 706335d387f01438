use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two sides of the board. Player one moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Numeric id (1 or 2) used in logs and on the rendered board
    pub fn id(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Reward axis used by tree search: rewards are stored from player one's
    /// point of view, so player two reads them negated.
    pub fn sign(self) -> f64 {
        match self {
            Player::One => 1.0,
            Player::Two => -1.0,
        }
    }

    /// Seat index (0 or 1) for indexing per-player arrays
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Result of a finished game. `Tie` never compares equal to a winning player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Winner(Player),
    Tie,
}

impl Outcome {
    pub fn is_win_for(self, player: Player) -> bool {
        self == Outcome::Winner(player)
    }

    /// Terminal reward from player one's perspective: +1, -1 or 0
    pub fn reward(self) -> f64 {
        match self {
            Outcome::Winner(player) => player.sign(),
            Outcome::Tie => 0.0,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Winner(player) => write!(f, "player {} wins", player),
            Outcome::Tie => write!(f, "tie"),
        }
    }
}
