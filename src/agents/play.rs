use crate::agents::agent::Agent;
use crate::game::environment::Mancala;
use crate::game::player::Outcome;
use crate::scoring::scoring::{scores, winner};
use crate::Result;

/// Final position of a finished match
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult {
    pub outcome: Outcome,
    pub scores: (u32, u32),
    pub moves: usize,
}

/// Plays one game between two agents, `first` seated as player one.
/// Both agents are told about every move so tree agents stay in sync.
pub fn play_game(first: &mut Agent, second: &mut Agent) -> Result<MatchResult> {
    let mut env = Mancala::new();
    let (mut state, _) = env.reset();
    let mut seats = [first, second];

    log::info!("{} (player 1) vs {} (player 2)", seats[0].name(), seats[1].name());
    let mut terminated = false;
    while !terminated {
        let mover = state.turn;
        let index = env.moves_played();
        let action = seats[mover.index()].get_action(&state, Some(index))?;
        let step = env.step(action)?;
        for agent in seats.iter_mut() {
            agent.update(action);
        }
        log::debug!("{} played {} as player {}", seats[mover.index()].name(), action, mover);
        state = step.state;
        terminated = step.terminated;
    }

    let outcome = winner(&state);
    let result = MatchResult {
        outcome,
        scores: scores(&state),
        moves: env.moves_played(),
    };
    match outcome {
        Outcome::Winner(player) => log::info!(
            "{} wins {}-{} after {} moves",
            seats[player.index()].name(),
            result.scores.0,
            result.scores.1,
            result.moves
        ),
        Outcome::Tie => log::info!("tie {}-{} after {} moves", result.scores.0, result.scores.1, result.moves),
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::game_state::TOTAL_STONES;
    use crate::game::player::Player;
    use crate::mcts::hyperparameters::{RolloutHyperparameters, UctHyperparameters};

    fn quick() -> RolloutHyperparameters {
        RolloutHyperparameters {
            num_samples: 4,
            horizon: 2,
            parallel: false,
            seed: Some(11),
        }
    }

    #[test]
    fn test_rollout_agents_finish_a_game() {
        let mut first = Agent::random_rollout("P1", quick()).unwrap();
        let mut second = Agent::random_rollout("P2", quick()).unwrap();
        let result = play_game(&mut first, &mut second).unwrap();

        assert_eq!(result.scores.0 + result.scores.1, TOTAL_STONES);
        let decisions = first.win_trace().len() + second.win_trace().len();
        assert_eq!(decisions, result.moves);
        assert!(first.win_trace().iter().all(|(index, _)| index.is_some()));
    }

    #[test]
    fn test_uct_against_rollout_agent() {
        let mut first = Agent::uct("uct", &UctHyperparameters::with_iterations(30).with_seed(12)).unwrap();
        let mut second = Agent::random_rollout("mcr", quick()).unwrap();
        let result = play_game(&mut first, &mut second).unwrap();

        assert_eq!(result.scores.0 + result.scores.1, TOTAL_STONES);
        match result.outcome {
            Outcome::Winner(Player::One) => assert!(result.scores.0 > result.scores.1),
            Outcome::Winner(Player::Two) => assert!(result.scores.1 > result.scores.0),
            Outcome::Tie => assert_eq!(result.scores.0, result.scores.1),
        }
    }
}
