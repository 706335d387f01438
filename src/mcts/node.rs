//! UCT search tree nodes.
//!
//! Nodes live in an arena owned by the tree and refer to each other by
//! [`NodeId`]. Ownership flows from the root to the leaves through the
//! `children` lists; `parent` is a back-reference used only to walk up during
//! backpropagation.

use crate::game::game_state::{Action, GameState};
use crate::game::get_legal_moves::valid_actions;
use crate::game::is_terminated::is_terminated;

/// Index into the node arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Expansion state of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodePhase {
    UnexpandedLeaf,
    PartiallyExpanded,
    FullyExpanded,
    Terminal,
}

#[derive(Debug, Clone)]
pub struct SearchNode {
    /// Game state at this node
    pub state: GameState,

    /// Parent node, `None` for the root
    pub parent: Option<NodeId>,

    /// Number of iterations that passed through this node
    pub visits: u32,

    /// Sum of rollout rewards, from player one's point of view
    pub total_reward: f64,

    pub is_terminal: bool,

    /// Every valid action has a child
    pub is_fully_expanded: bool,

    /// Tried actions and their children, in expansion order
    pub children: Vec<(Action, NodeId)>,
}

impl SearchNode {
    pub fn new(state: GameState, parent: Option<NodeId>) -> Self {
        let is_terminal = is_terminated(&state);
        Self {
            state,
            parent,
            visits: 0,
            total_reward: 0.0,
            is_terminal,
            is_fully_expanded: is_terminal,
            children: Vec::new(),
        }
    }

    /// Mean reward from player one's point of view; 0 before the first visit
    pub fn mean_reward(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.total_reward / self.visits as f64
        }
    }

    pub fn child(&self, action: Action) -> Option<NodeId> {
        self.children
            .iter()
            .find(|(a, _)| *a == action)
            .map(|(_, id)| *id)
    }

    /// First valid action without a child, in ascending pit order
    pub fn untried_action(&self) -> Option<Action> {
        valid_actions(&self.state)
            .into_iter()
            .find(|&action| self.child(action).is_none())
    }

    pub fn phase(&self) -> NodePhase {
        if self.is_terminal {
            NodePhase::Terminal
        } else if self.is_fully_expanded {
            NodePhase::FullyExpanded
        } else if self.children.is_empty() {
            NodePhase::UnexpandedLeaf
        } else {
            NodePhase::PartiallyExpanded
        }
    }
}
