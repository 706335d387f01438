//! Heuristic readouts for truncated rollouts.
//!
//! A heuristic scores the change between the state a rollout started from and
//! the state it stopped in. Positive values favour player one; the evaluator
//! flips the sign when player two is the one deciding.

use crate::game::game_state::{GameState, BOARD_SIZE};
use crate::Result;
use rand::rngs::StdRng;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub trait Heuristic: Send + Sync {
    fn evaluate(&self, before: &GameState, after: &GameState) -> f64;
}

/// Linear readout over the 14 board fields
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReadoutWeights(pub [f64; BOARD_SIZE]);

impl ReadoutWeights {
    /// Score difference readout: +1 on player one's side and store, -1 on player two's
    pub fn initial() -> Self {
        let mut weights = [0.0; BOARD_SIZE];
        weights[0..7].fill(1.0);
        weights[7..14].fill(-1.0);
        ReadoutWeights(weights)
    }

    /// Independent standard normal entries
    pub fn random(rng: &mut StdRng) -> Self {
        let mut weights = [0.0; BOARD_SIZE];
        for w in weights.iter_mut() {
            *w = StandardNormal.sample(rng);
        }
        ReadoutWeights(weights)
    }

    /// Reads a JSON array of 14 numbers
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// `w · (after - before)`
    pub fn linear_value(&self, before: &GameState, after: &GameState) -> f64 {
        before
            .board_difference(after)
            .iter()
            .zip(self.0.iter())
            .map(|(d, w)| d * w)
            .sum()
    }
}

impl Default for ReadoutWeights {
    fn default() -> Self {
        Self::initial()
    }
}

impl Heuristic for ReadoutWeights {
    fn evaluate(&self, before: &GameState, after: &GameState) -> f64 {
        self.linear_value(before, after)
    }
}

impl<F> Heuristic for F
where
    F: Fn(&GameState, &GameState) -> f64 + Send + Sync,
{
    fn evaluate(&self, before: &GameState, after: &GameState) -> f64 {
        self(before, after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::game_state::{initial_state, Action};
    use crate::game::next_state::next_state;
    use crate::MancalaError;
    use assert_matches::assert_matches;
    use rand::SeedableRng;
    use std::io::Write;

    #[test]
    fn test_initial_readout_ignores_moves_within_one_side() {
        let before = initial_state();
        // pit 2 sows pits 3-5 and the store: every stone stays on player one's side
        let after = next_state(&before, Action(2));
        let w = ReadoutWeights::initial();
        assert_eq!(w.evaluate(&before, &after), 0.0);
    }

    #[test]
    fn test_initial_readout_counts_stones_moving_sides() {
        let before = initial_state();
        // pit 5 sows store + pits 7, 8, 9: three stones cross to player two's side
        let after = next_state(&before, Action(5));
        let w = ReadoutWeights::initial();
        assert_eq!(w.evaluate(&before, &after), -6.0);
    }

    #[test]
    fn test_random_readout_is_seeded() {
        let a = ReadoutWeights::random(&mut StdRng::seed_from_u64(3));
        let b = ReadoutWeights::random(&mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
        assert_ne!(a, ReadoutWeights::initial());
    }

    #[test]
    fn test_load_readout_from_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 1, 1, 1, 1, 1, 2, -1, -1, -1, -1, -1, -1, -2]").unwrap();
        let w = ReadoutWeights::from_json_file(file.path()).unwrap();
        assert_eq!(w.0[6], 2.0);
        assert_eq!(w.0[13], -2.0);
    }

    #[test]
    fn test_load_readout_rejects_wrong_length() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2, 3]").unwrap();
        assert_matches!(
            ReadoutWeights::from_json_file(file.path()),
            Err(MancalaError::Json(_))
        );
    }

    #[test]
    fn test_closure_heuristic() {
        let stores_only = |before: &GameState, after: &GameState| {
            after.board[6] as f64 - before.board[6] as f64
        };
        let before = initial_state();
        let after = next_state(&before, Action(2));
        assert_eq!(stores_only.evaluate(&before, &after), 1.0);
    }
}
