//! Gym-style wrapper owning the live game for match drivers.
//!
//! The environment never decides anything: it validates the requested move,
//! applies it through the rules engine and reports what happened. Winning and
//! losing are read from [`winner`](crate::scoring::scoring::winner) once
//! `terminated` is set; the step reward itself is always zero.

use crate::game::game_state::{initial_state, Action, GameState};
use crate::game::get_legal_moves::check_action;
use crate::game::is_terminated::is_terminated;
use crate::game::next_state::sow;
use crate::game::player::Outcome;
use crate::scoring::scoring::winner;
use crate::Result;

/// Side information returned with every reset/step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepInfo {
    pub action: Option<Action>,
    pub extra_turn: bool,
    pub captured: u8,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub state: GameState,
    pub reward: f64,
    pub terminated: bool,
    pub truncated: bool,
    pub info: StepInfo,
}

#[derive(Debug, Clone)]
pub struct Mancala {
    state: GameState,
    moves_played: usize,
}

impl Mancala {
    pub fn new() -> Self {
        Mancala {
            state: initial_state(),
            moves_played: 0,
        }
    }

    pub fn reset(&mut self) -> (GameState, StepInfo) {
        self.state = initial_state();
        self.moves_played = 0;
        (self.state, StepInfo::default())
    }

    /// Applies `action` for the player to move. Illegal actions and moves after
    /// the end of the game are rejected without touching the state.
    pub fn step(&mut self, action: Action) -> Result<StepOutcome> {
        check_action(&self.state, action)?;

        let sowing = sow(&self.state, action);
        self.state = sowing.state;
        self.moves_played += 1;
        let terminated = is_terminated(&self.state);

        log::debug!(
            "move {}: pit {} -> last stone at {}, captured {}, extra turn {}",
            self.moves_played,
            action,
            sowing.last_position,
            sowing.captured,
            sowing.extra_turn
        );

        Ok(StepOutcome {
            state: self.state,
            reward: 0.0,
            terminated,
            truncated: false,
            info: StepInfo {
                action: Some(action),
                extra_turn: sowing.extra_turn,
                captured: sowing.captured,
            },
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn moves_played(&self) -> usize {
        self.moves_played
    }

    pub fn is_terminated(&self) -> bool {
        is_terminated(&self.state)
    }

    /// Final result, or `None` while the game is still running
    pub fn outcome(&self) -> Option<Outcome> {
        self.is_terminated().then(|| winner(&self.state))
    }
}

impl Default for Mancala {
    fn default() -> Self {
        Self::new()
    }
}
