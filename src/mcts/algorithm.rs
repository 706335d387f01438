//! UCT (Upper Confidence bounds applied to Trees) search.
//!
//! One iteration runs the four classic phases:
//!
//! 1. **Selection**: descend through fully expanded nodes with UCB1
//! 2. **Expansion**: add the first untried action of the node reached
//! 3. **Simulation**: play the rollout policy from the new node to the end
//! 4. **Backpropagation**: add the reward to every node up to the root
//!
//! The tree survives between moves. [`UctSearchTree::advance`] re-roots it at
//! the child matching the move actually played, so statistics gathered for
//! that line carry over to the next search.

use crate::game::game_state::{Action, GameState};
use crate::game::get_legal_moves::valid_actions;
use crate::game::next_state::next_state;
use crate::game::simulate_game::simulate_to_end;
use crate::mcts::hyperparameters::{SearchBudget, UctHyperparameters};
use crate::mcts::mcts_result::SearchDetails;
use crate::mcts::node::{NodeId, SearchNode};
use crate::mcts::selection::select_best_child;
use crate::scoring::scoring::winner;
use crate::strategy::rollout_policy::{RolloutPolicy, UniformRandomPolicy};
use crate::utils::rng::make_rng;
use crate::Result;
use rand::rngs::StdRng;
use std::collections::VecDeque;
use std::time::Instant;

pub struct UctSearchTree {
    nodes: Vec<SearchNode>,
    root: NodeId,
    budget: SearchBudget,
    exploration_weight: f64,
    exploitation_weight: f64,
    policy: Box<dyn RolloutPolicy>,
    rng: StdRng,
}

impl UctSearchTree {
    /// Tree rooted at `state` with uniform random rollouts.
    /// Fails when the budget configuration is invalid.
    pub fn new(state: GameState, params: &UctHyperparameters) -> Result<Self> {
        Self::with_policy(state, params, Box::new(UniformRandomPolicy))
    }

    pub fn with_policy(
        state: GameState,
        params: &UctHyperparameters,
        policy: Box<dyn RolloutPolicy>,
    ) -> Result<Self> {
        let budget = params.budget()?;
        Ok(Self {
            nodes: vec![SearchNode::new(state, None)],
            root: NodeId(0),
            budget,
            exploration_weight: params.exploration_weight,
            exploitation_weight: params.exploitation_weight,
            policy,
            rng: make_rng(params.seed),
        })
    }

    pub fn budget(&self) -> SearchBudget {
        self.budget
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn root(&self) -> &SearchNode {
        self.node(self.root)
    }

    pub fn root_state(&self) -> &GameState {
        &self.root().state
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.index()]
    }

    /// Nodes currently held by the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Throws the whole tree away and starts over from `state`
    pub fn reset(&mut self, state: GameState) {
        self.nodes = vec![SearchNode::new(state, None)];
        self.root = NodeId(0);
    }

    /// Runs the configured budget from the current root and returns the best
    /// action, or `None` if the root is terminal.
    pub fn search(&mut self) -> Option<Action> {
        self.search_with_details().map(|details| details.action)
    }

    pub fn search_with_details(&mut self) -> Option<SearchDetails> {
        if self.root().is_terminal {
            log::debug!("search requested from a terminal root");
            return None;
        }

        let started = Instant::now();
        let mut iterations = 0u32;
        match self.budget {
            SearchBudget::Iterations(limit) => {
                for _ in 0..limit {
                    self.execute_round();
                    iterations += 1;
                }
            }
            SearchBudget::Time(limit) => {
                // the clock is only read between whole iterations
                let deadline = started + limit;
                loop {
                    self.execute_round();
                    iterations += 1;
                    if Instant::now() >= deadline {
                        break;
                    }
                }
            }
        }

        let (action, child_id) = self.best_child(0.0, 1.0)?;
        let root = self.root();
        let child = self.node(child_id);
        let details = SearchDetails {
            action,
            expected_reward: root.state.turn.sign() * child.mean_reward(),
            child_visits: child.visits,
            root_visits: root.visits,
            iterations,
            tree_size: self.nodes.len(),
        };

        log::debug!(
            "uct: {} iterations in {:?}, {} nodes, chose {} (expected reward {:.3} over {} visits)",
            iterations,
            started.elapsed(),
            details.tree_size,
            action,
            details.expected_reward,
            details.child_visits
        );
        Some(details)
    }

    /// One selection-expansion-simulation-backpropagation round
    pub fn execute_round(&mut self) {
        let node_id = self.select_and_expand();
        let reward = self.rollout(node_id);
        self.backpropagate(node_id, reward);
    }

    /// Root child maximizing UCB1 with the given weights
    pub fn best_child(&mut self, exploration_weight: f64, exploitation_weight: f64) -> Option<(Action, NodeId)> {
        select_best_child(
            &self.nodes,
            self.root,
            exploration_weight,
            exploitation_weight,
            &mut self.rng,
        )
    }

    /// Moves the root along `action`, keeping the matching subtree if it was
    /// explored and dropping everything else.
    pub fn advance(&mut self, action: Action) {
        match self.root().child(action) {
            Some(child) => self.reroot(child),
            None => {
                let state = next_state(self.root_state(), action);
                log::debug!("uct: action {} was never expanded, rebuilding the tree", action);
                self.reset(state);
            }
        }
    }

    fn select_and_expand(&mut self) -> NodeId {
        let mut current = self.root;
        while !self.node(current).is_terminal {
            if self.node(current).is_fully_expanded {
                current = select_best_child(
                    &self.nodes,
                    current,
                    self.exploration_weight,
                    self.exploitation_weight,
                    &mut self.rng,
                )
                .map(|(_, id)| id)
                .expect("fully expanded non-terminal node without children");
            } else {
                return self.expand(current);
            }
        }
        current
    }

    fn expand(&mut self, node_id: NodeId) -> NodeId {
        let node = self.node(node_id);
        debug_assert!(!node.is_fully_expanded, "expand called on a fully expanded node");
        let state = node.state;
        let action = node
            .untried_action()
            .expect("node marked as not fully expanded has no untried action");

        let child_id = NodeId(self.nodes.len() as u32);
        self.nodes
            .push(SearchNode::new(next_state(&state, action), Some(node_id)));

        let action_count = valid_actions(&state).len();
        let node = &mut self.nodes[node_id.index()];
        node.children.push((action, child_id));
        if node.children.len() == action_count {
            node.is_fully_expanded = true;
        }
        child_id
    }

    /// +1 / -1 / 0 for a player one win / player two win / tie
    fn rollout(&mut self, node_id: NodeId) -> f64 {
        let state = self.node(node_id).state;
        let final_state = simulate_to_end(&state, self.policy.as_ref(), &mut self.rng);
        winner(&final_state).reward()
    }

    fn backpropagate(&mut self, node_id: NodeId, reward: f64) {
        let mut current = Some(node_id);
        while let Some(id) = current {
            let node = &mut self.nodes[id.index()];
            node.visits += 1;
            node.total_reward += reward;
            current = node.parent;
        }
    }

    /// Rebuilds the arena from the subtree under `new_root`; all other nodes are dropped.
    fn reroot(&mut self, new_root: NodeId) {
        let before = self.nodes.len();
        let mut old: Vec<Option<SearchNode>> = std::mem::take(&mut self.nodes)
            .into_iter()
            .map(Some)
            .collect();

        let mut kept = Vec::new();
        let mut queue = VecDeque::from([(new_root, None)]);
        while let Some((old_id, parent)) = queue.pop_front() {
            let mut node = old[old_id.index()]
                .take()
                .expect("tree node reachable twice");
            let new_id = kept.len();
            node.parent = parent;
            // children are numbered in the order they leave the queue
            let first_child = new_id + 1 + queue.len();
            for (k, (_, child)) in node.children.iter_mut().enumerate() {
                queue.push_back((*child, Some(NodeId(new_id as u32))));
                *child = NodeId((first_child + k) as u32);
            }
            kept.push(node);
        }
        drop(old);

        log::debug!("uct: re-rooted, kept {} of {} nodes", kept.len(), before);
        self.nodes = kept;
        self.root = NodeId(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::game_state::initial_state;
    use crate::game::player::Player;
    use crate::mcts::node::NodePhase;
    use crate::MancalaError;
    use assert_matches::assert_matches;

    fn tree(state: GameState, iterations: u32, seed: u64) -> UctSearchTree {
        UctSearchTree::new(state, &UctHyperparameters::with_iterations(iterations).with_seed(seed)).unwrap()
    }

    /// Walks the subtree and checks parent links and visit accounting
    fn assert_consistent(tree: &UctSearchTree) {
        assert_eq!(tree.root().parent, None);
        let mut reachable = 0;
        let mut stack = vec![tree.root_id()];
        while let Some(id) = stack.pop() {
            reachable += 1;
            let node = tree.node(id);
            let child_visits: u32 = node.children.iter().map(|(_, c)| tree.node(*c).visits).sum();
            assert!(child_visits <= node.visits);
            for (action, child) in &node.children {
                assert_eq!(tree.node(*child).parent, Some(id));
                assert_eq!(tree.node(*child).state, next_state(&node.state, *action));
                stack.push(*child);
            }
        }
        assert_eq!(reachable, tree.len());
    }

    #[test]
    fn test_construction_rejects_bad_budgets() {
        let state = initial_state();
        let both = UctHyperparameters {
            time_limit_ms: Some(10),
            iteration_limit: Some(10),
            ..Default::default()
        };
        assert_matches!(UctSearchTree::new(state, &both).err(), Some(MancalaError::ConflictingBudgets));

        let none = UctHyperparameters {
            time_limit_ms: None,
            iteration_limit: None,
            ..Default::default()
        };
        assert_matches!(UctSearchTree::new(state, &none).err(), Some(MancalaError::MissingBudget));

        assert_matches!(
            UctSearchTree::new(state, &UctHyperparameters::with_iterations(0)).err(),
            Some(MancalaError::InvalidIterationLimit(0))
        );
    }

    #[test]
    fn test_expansion_follows_pit_order() {
        let mut t = tree(initial_state(), 1, 1);
        t.execute_round();
        assert_eq!(t.root().children.iter().map(|(a, _)| *a).collect::<Vec<_>>(), vec![Action(0)]);
        assert_eq!(t.root().phase(), NodePhase::PartiallyExpanded);

        for _ in 0..5 {
            t.execute_round();
        }
        let actions: Vec<Action> = t.root().children.iter().map(|(a, _)| *a).collect();
        assert_eq!(actions, (0..6).map(Action).collect::<Vec<_>>());
        assert_eq!(t.root().phase(), NodePhase::FullyExpanded);
        assert!(t.root().children.iter().all(|(_, c)| t.node(*c).visits == 1));
    }

    #[test]
    fn test_every_iteration_visits_root_and_one_child() {
        let mut t = tree(initial_state(), 300, 2);
        let details = t.search_with_details().unwrap();

        assert_eq!(details.iterations, 300);
        assert_eq!(t.root().visits, 300);
        let child_visits: u32 = t.root().children.iter().map(|(_, c)| t.node(*c).visits).sum();
        assert_eq!(child_visits, 300);
        assert!(valid_actions(&initial_state()).contains(&details.action));
        assert!((-1.0..=1.0).contains(&details.expected_reward));
        assert_consistent(&t);
    }

    #[test]
    fn test_terminal_root_returns_no_action() {
        let board = [0, 0, 0, 0, 0, 0, 24, 4, 0, 0, 0, 0, 0, 20];
        let mut t = tree(GameState::new(board, Player::One), 10, 0);
        assert_eq!(t.search(), None);
        assert_eq!(t.root().visits, 0);
    }

    #[test]
    fn test_converges_to_forced_win_for_player_one() {
        // pit 0 captures and wins 25-23, pit 4 lets player two finish 25-23
        let state = GameState::new([1, 0, 0, 0, 1, 0, 21, 0, 0, 0, 0, 2, 0, 23], Player::One);
        for iterations in [2, 10, 50, 200] {
            for seed in 0..10 {
                assert_eq!(tree(state, iterations, seed).search(), Some(Action(0)));
            }
        }
    }

    #[test]
    fn test_converges_to_forced_win_for_player_two() {
        // mirror image of the position above
        let state = GameState::new([0, 0, 0, 0, 2, 0, 23, 1, 0, 0, 0, 1, 0, 21], Player::Two);
        for iterations in [2, 10, 50, 200] {
            for seed in 0..10 {
                let mut t = tree(state, iterations, seed);
                let details = t.search_with_details().unwrap();
                assert_eq!(details.action, Action(7));
                assert_eq!(details.expected_reward, 1.0);
            }
        }
    }

    #[test]
    fn test_advance_keeps_explored_subtree() {
        let mut t = tree(initial_state(), 500, 4);
        let action = t.search().unwrap();
        let child = t.root().child(action).unwrap();
        let child_visits = t.node(child).visits;
        let child_reward = t.node(child).total_reward;
        let child_state = t.node(child).state;

        t.advance(action);

        assert_eq!(*t.root_state(), child_state);
        assert_eq!(t.root().visits, child_visits);
        assert_eq!(t.root().total_reward, child_reward);
        assert!(t.len() < 500 + 1);
        assert_consistent(&t);

        // searching again adds on top of the reused statistics
        t.search().unwrap();
        assert_eq!(t.root().visits, child_visits + 500);
        assert_consistent(&t);
    }

    #[test]
    fn test_advance_on_unexplored_action_rebuilds() {
        let mut t = tree(initial_state(), 1, 5);
        t.search().unwrap();
        // only pit 0 was expanded
        t.advance(Action(3));
        assert_eq!(t.len(), 1);
        assert_eq!(*t.root_state(), next_state(&initial_state(), Action(3)));
        assert_eq!(t.root().visits, 0);
    }

    #[test]
    fn test_time_budget_runs_whole_iterations() {
        let params = UctHyperparameters::with_time_limit_ms(20).with_seed(6);
        let mut t = UctSearchTree::new(initial_state(), &params).unwrap();
        let details = t.search_with_details().unwrap();
        assert!(details.iterations >= 1);
        assert_eq!(t.root().visits, details.iterations);
        assert_consistent(&t);
    }
}
