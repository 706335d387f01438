//! Text rendering of the board for the command-line driver.
//!
//! ```text
//!           <-
//!      G H I J K L
//!      4 4 4 4 4 4
//! 0                    0
//!      4 4 4 4 4 4
//!      A B C D E F
//!           ->
//! ```

use crate::game::game_state::{store_index, Action, GameState};
use crate::game::is_terminated::is_terminated;
use crate::game::player::Player;
use crate::scoring::scoring::{scores, winner};

const LETTERS: &[u8; 13] = b"ABCDEF LKJIHG";

/// Letter shown under a pit
pub fn action_to_letter(action: Action) -> char {
    LETTERS[action.position()] as char
}

/// Inverse of [`action_to_letter`], case-insensitive. Stores have no letter.
pub fn letter_to_action(letter: char) -> Option<Action> {
    let upper = letter.to_ascii_uppercase();
    if upper == ' ' {
        return None;
    }
    LETTERS
        .iter()
        .position(|&c| c as char == upper)
        .map(Action)
}

fn count_to_char(count: u8, unicode: bool) -> String {
    if !unicode {
        return count.to_string();
    }
    match count {
        0 => " ".to_string(),
        1 => ".".to_string(),
        2 => ":".to_string(),
        3 => "\u{2E2A}".to_string(),
        4 => "\u{2E2C}".to_string(),
        5 => "\u{2059}".to_string(),
        6 => "\u{283F}".to_string(),
        7 => "\u{28BF}".to_string(),
        8 => "\u{28FF}".to_string(),
        n => n.to_string(),
    }
}

/// Multi-line picture of `state`; player two's row is printed on top, right to left.
pub fn render(state: &GameState, last_action: Option<Action>, unicode: bool) -> String {
    let mut out = String::new();
    if let Some(action) = last_action {
        out.push_str(&format!("player chose {}\n\n", action_to_letter(action)));
    }

    let top: Vec<usize> = (7..13).rev().collect();
    let bottom: Vec<usize> = (0..6).collect();
    let letters = |positions: &[usize]| {
        positions
            .iter()
            .map(|&p| action_to_letter(Action(p)).to_string())
            .collect::<Vec<_>>()
            .join(" ")
    };
    let counts = |positions: &[usize]| {
        positions
            .iter()
            .map(|&p| count_to_char(state.board[p], unicode))
            .collect::<Vec<_>>()
            .join(" ")
    };

    out.push_str(&format!("{}<-\n", " ".repeat(10)));
    out.push_str(&format!("{}{}\n", " ".repeat(5), letters(&top)));
    out.push_str(&format!("{}{}\n", " ".repeat(5), counts(&top)));
    out.push_str(&format!(
        "{}{}{}\n",
        state.board[store_index(Player::Two)],
        " ".repeat(20),
        state.board[store_index(Player::One)]
    ));
    out.push_str(&format!("{}{}\n", " ".repeat(5), counts(&bottom)));
    out.push_str(&format!("{}{}\n", " ".repeat(5), letters(&bottom)));
    out.push_str(&format!("{}->\n", " ".repeat(10)));
    out.push_str(&format!("\nplayer {} to move", state.turn));

    if is_terminated(state) {
        let (one, two) = scores(state);
        out.push_str(&format!("\n{}: ({}, {})", winner(state), one, two));
    }

    out
}
