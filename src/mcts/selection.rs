//! UCB1 child selection.
//!
//! Rewards are stored from player one's point of view, so the exploitation
//! term is multiplied by the sign of the player to move at the parent.

use crate::game::game_state::Action;
use crate::game::player::Player;
use crate::mcts::node::{NodeId, SearchNode};
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;

/// `ew * sqrt(2 ln(N) / n) + xw * (sign * R / n)` for a visited child
pub fn ucb_value(
    parent_visits: u32,
    parent_turn: Player,
    child: &SearchNode,
    exploration_weight: f64,
    exploitation_weight: f64,
) -> f64 {
    debug_assert!(child.visits > 0, "UCB1 on an unvisited child");
    let n = child.visits as f64;
    let exploration = (2.0 * (parent_visits as f64).ln() / n).sqrt();
    let exploitation = parent_turn.sign() * child.total_reward / n;
    exploration_weight * exploration + exploitation_weight * exploitation
}

/// Child of `node_id` with the highest UCB1 value; equal values are broken
/// uniformly at random. `None` when the node has no children.
pub fn select_best_child(
    nodes: &[SearchNode],
    node_id: NodeId,
    exploration_weight: f64,
    exploitation_weight: f64,
    rng: &mut StdRng,
) -> Option<(Action, NodeId)> {
    let node = &nodes[node_id.index()];
    let mut best_value = f64::NEG_INFINITY;
    let mut best: Vec<(Action, NodeId)> = Vec::new();

    for &(action, child_id) in &node.children {
        let value = ucb_value(
            node.visits,
            node.state.turn,
            &nodes[child_id.index()],
            exploration_weight,
            exploitation_weight,
        );
        if value > best_value {
            best_value = value;
            best.clear();
            best.push((action, child_id));
        } else if value == best_value {
            best.push((action, child_id));
        }
    }

    best.choose(rng).copied()
}
