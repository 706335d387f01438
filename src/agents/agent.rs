use crate::game::game_state::{initial_state, Action, GameState};
use crate::game::get_legal_moves::valid_actions;
use crate::game::is_terminated::is_terminated;
use crate::mcts::algorithm::UctSearchTree;
use crate::mcts::heuristic_rollout::HeuristicRolloutEvaluator;
use crate::mcts::hyperparameters::{RolloutHyperparameters, UctHyperparameters};
use crate::mcts::random_rollout::RandomRolloutEvaluator;
use crate::strategy::heuristic::Heuristic;
use crate::{MancalaError, Result};

/// Decision engine behind an [`Agent`]
pub enum AgentKind {
    RandomRollout(RandomRolloutEvaluator),
    HeuristicRollout(HeuristicRolloutEvaluator),
    Uct(UctSearchTree),
}

/// A computer player. Every decision appends `(index, belief)` to the win
/// trace, where belief is the best mean payout (rollout agents) or the
/// estimated win probability of the chosen move (UCT).
pub struct Agent {
    name: String,
    kind: AgentKind,
    verbose: bool,
    estimated_win_percents: Vec<(Option<usize>, f64)>,
}

impl Agent {
    fn with_kind(name: impl Into<String>, kind: AgentKind) -> Self {
        Agent {
            name: name.into(),
            kind,
            verbose: false,
            estimated_win_percents: Vec::new(),
        }
    }

    pub fn random_rollout(name: impl Into<String>, params: RolloutHyperparameters) -> Result<Self> {
        let evaluator = RandomRolloutEvaluator::new(params)?;
        Ok(Self::with_kind(name, AgentKind::RandomRollout(evaluator)))
    }

    pub fn heuristic_rollout(
        name: impl Into<String>,
        params: RolloutHyperparameters,
        heuristic: Box<dyn Heuristic>,
    ) -> Result<Self> {
        let evaluator = HeuristicRolloutEvaluator::with_heuristic(params, heuristic)?;
        Ok(Self::with_kind(name, AgentKind::HeuristicRollout(evaluator)))
    }

    /// UCT agent whose tree starts at the opening position
    pub fn uct(name: impl Into<String>, params: &UctHyperparameters) -> Result<Self> {
        let tree = UctSearchTree::new(initial_state(), params)?;
        Ok(Self::with_kind(name, AgentKind::Uct(tree)))
    }

    /// Log every win belief at info level instead of debug
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &AgentKind {
        &self.kind
    }

    /// `(index, belief)` for every decision taken so far
    pub fn win_trace(&self) -> &[(Option<usize>, f64)] {
        &self.estimated_win_percents
    }

    /// Chooses a move for the player to move in `state`. `index` is only
    /// recorded in the win trace.
    pub fn get_action(&mut self, state: &GameState, index: Option<usize>) -> Result<Action> {
        if is_terminated(state) {
            return Err(MancalaError::GameOver);
        }

        let (action, belief, details) = match &mut self.kind {
            AgentKind::RandomRollout(evaluator) => {
                let evaluation = evaluator.evaluate(state).ok_or(MancalaError::GameOver)?;
                let pcts = percents(&evaluation.mean_payouts);
                (evaluation.best_action, evaluation.best_value, pcts)
            }
            AgentKind::HeuristicRollout(evaluator) => {
                let evaluation = evaluator.evaluate(state).ok_or(MancalaError::GameOver)?;
                let pcts = percents(&evaluation.mean_payouts);
                (evaluation.best_action, evaluation.best_value, pcts)
            }
            AgentKind::Uct(tree) => {
                if tree.root_state() != state {
                    log::debug!("{}: tree out of sync with the game, starting over", self.name);
                    tree.reset(*state);
                }
                let details = tree.search_with_details().ok_or(MancalaError::GameOver)?;
                let summary = format!(
                    "{} visits of {}, {} nodes",
                    details.child_visits, details.root_visits, details.tree_size
                );
                (details.action, details.win_probability(), summary)
            }
        };

        self.estimated_win_percents.push((index, belief));
        let pct = (100.0 * belief).round();
        if self.verbose {
            log::info!("CPU({}) win belief: {}% ({})", self.name, pct, details);
        } else {
            log::debug!("CPU({}) win belief: {}% ({})", self.name, pct, details);
        }
        Ok(action)
    }

    /// Informs the agent that `action` was played from the current position,
    /// by either side. Only the UCT agent keeps state across moves.
    pub fn update(&mut self, action: Action) {
        if let AgentKind::Uct(tree) = &mut self.kind {
            let root = *tree.root_state();
            if !is_terminated(&root) && valid_actions(&root).contains(&action) {
                tree.advance(action);
            } else {
                // get_action resets a tree that no longer matches the game
                log::debug!("{}: ignoring update with {} for an unrelated root", self.name, action);
            }
        }
    }
}

fn percents(mean_payouts: &[(Action, f64)]) -> String {
    mean_payouts
        .iter()
        .map(|(action, value)| format!("{}:{}", action, (100.0 * value).round()))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::next_state::next_state;
    use crate::game::player::Player;
    use crate::strategy::heuristic::ReadoutWeights;
    use assert_matches::assert_matches;

    fn rollout_params() -> RolloutHyperparameters {
        RolloutHyperparameters {
            num_samples: 20,
            horizon: 3,
            parallel: false,
            seed: Some(3),
        }
    }

    fn forced_win() -> GameState {
        GameState::new([1, 0, 0, 0, 1, 0, 21, 0, 0, 0, 0, 2, 0, 23], Player::One)
    }

    #[test]
    fn test_every_kind_finds_the_forced_win() {
        let mut agents = vec![
            Agent::random_rollout("mcr", rollout_params()).unwrap(),
            Agent::heuristic_rollout("mch", rollout_params(), Box::new(ReadoutWeights::initial())).unwrap(),
            Agent::uct("uct", &UctHyperparameters::with_iterations(50).with_seed(3)).unwrap(),
        ];
        for agent in agents.iter_mut() {
            assert_eq!(agent.get_action(&forced_win(), Some(7)).unwrap(), Action(0), "{}", agent.name());
            assert_eq!(agent.win_trace().len(), 1);
            assert_eq!(agent.win_trace()[0].0, Some(7));
            assert_eq!(agent.win_trace()[0].1, 1.0);
        }
    }

    #[test]
    fn test_finished_game_is_an_error() {
        let state = GameState::new([0, 0, 0, 0, 0, 0, 24, 4, 0, 0, 0, 0, 0, 20], Player::One);
        let mut agent = Agent::random_rollout("mcr", rollout_params()).unwrap();
        assert_matches!(agent.get_action(&state, None), Err(MancalaError::GameOver));
        assert!(agent.win_trace().is_empty());
    }

    #[test]
    fn test_bad_configuration_is_rejected() {
        let params = RolloutHyperparameters {
            num_samples: 0,
            ..rollout_params()
        };
        assert_matches!(Agent::random_rollout("mcr", params).err(), Some(MancalaError::Config(_)));
        assert_matches!(
            Agent::uct("uct", &UctHyperparameters::with_iterations(0)).err(),
            Some(MancalaError::InvalidIterationLimit(0))
        );
    }

    #[test]
    fn test_uct_tree_follows_both_sides() {
        let mut agent = Agent::uct("uct", &UctHyperparameters::with_iterations(200).with_seed(8)).unwrap();
        let start = initial_state();
        let mine = agent.get_action(&start, Some(0)).unwrap();
        agent.update(mine);
        let after_mine = next_state(&start, mine);

        let theirs = valid_actions(&after_mine)[0];
        agent.update(theirs);
        let after_theirs = next_state(&after_mine, theirs);

        match agent.kind() {
            AgentKind::Uct(tree) => assert_eq!(*tree.root_state(), after_theirs),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_uct_resyncs_with_unexpected_state() {
        let mut agent = Agent::uct("uct", &UctHyperparameters::with_iterations(20).with_seed(9)).unwrap();
        let elsewhere = next_state(&next_state(&initial_state(), Action(0)), Action(7));
        let action = agent.get_action(&elsewhere, None).unwrap();
        assert!(valid_actions(&elsewhere).contains(&action));
        match agent.kind() {
            AgentKind::Uct(tree) => assert_eq!(*tree.root_state(), elsewhere),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_rollout_agents_ignore_updates() {
        let mut agent = Agent::random_rollout("mcr", rollout_params()).unwrap();
        agent.update(Action(3));
        let action = agent.get_action(&initial_state(), None).unwrap();
        assert!(valid_actions(&initial_state()).contains(&action));
    }
}
