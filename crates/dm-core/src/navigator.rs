//! Directional traversal of a generated map
//!
//! The player only ever chooses left or right. From a node, left takes the
//! exit with the smallest x and right the one with the largest; a single exit
//! is taken whichever way is chosen. Nodes have at most two exits, so this
//! reaches every exit. A node with more would have its middle exits
//! unreachable.
//!
//! Every move is recorded. Replaying the recorded directions on the same
//! graph from the same root lands on the same node, which is how a saved run
//! is resumed.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use strum::Display;
use thiserror::Error;
use tracing::debug;

use crate::error::GraphError;
use crate::map::{MapGraph, NodeId};

/// Player input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(into = "i8", try_from = "i8")]
#[repr(i8)]
pub enum Direction {
    Left = -1,
    Right = 1,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Invalid direction value {0}, expected -1 or 1")]
pub struct InvalidDirection(pub i8);

impl From<Direction> for i8 {
    fn from(direction: Direction) -> i8 {
        direction as i8
    }
}

impl TryFrom<i8> for Direction {
    type Error = InvalidDirection;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Direction::Left),
            1 => Ok(Direction::Right),
            other => Err(InvalidDirection(other)),
        }
    }
}

impl Direction {
    /// 'L'/'l' or 'R'/'r'
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'L' => Some(Direction::Left),
            'R' => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Direction::Left => 'L',
            Direction::Right => 'R',
        }
    }
}

/// Result of one move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Current node has no exits
    Stayed,
    Moved { node: NodeId, newly_visited: bool },
}

/// Exit `direction` selects from `node`, if any
pub fn select_exit(graph: &MapGraph, node: NodeId, direction: Direction) -> Option<NodeId> {
    let mut exits = graph.get(node)?.exits.clone();
    match exits.len() {
        0 => None,
        1 => Some(exits[0]),
        _ => {
            exits.sort_by(|a, b| graph[*a].position.x.total_cmp(&graph[*b].position.x));
            match direction {
                Direction::Left => exits.first().copied(),
                Direction::Right => exits.last().copied(),
            }
        }
    }
}

/// Cursor over one map. Holds no reference to the graph; callers pass the
/// graph the navigator was initialized on.
#[derive(Debug, Clone)]
pub struct Navigator {
    root: NodeId,
    current: NodeId,
    visited: HashSet<NodeId>,
    path: Vec<Direction>,
}

impl Navigator {
    /// Start at `root`, which counts as visited
    pub fn new(graph: &MapGraph, root: NodeId) -> Result<Self, GraphError> {
        if graph.get(root).is_none() {
            return Err(GraphError::UnknownNode(root.index()));
        }
        let mut visited = HashSet::new();
        visited.insert(root);
        debug!("navigator entered {}", root);
        Ok(Self {
            root,
            current: root,
            visited,
            path: Vec::new(),
        })
    }

    /// Reset to `root`, forgetting visits and history
    pub fn initialize(&mut self, graph: &MapGraph, root: NodeId) -> Result<(), GraphError> {
        *self = Self::new(graph, root)?;
        Ok(())
    }

    /// Move one step. Every call is recorded, including ones that stay put.
    pub fn step(&mut self, graph: &MapGraph, direction: Direction) -> MoveOutcome {
        self.path.push(direction);

        let Some(next) = select_exit(graph, self.current, direction) else {
            return MoveOutcome::Stayed;
        };

        self.current = next;
        let newly_visited = self.visited.insert(next);
        debug!(
            "moved {} to {} (room {}){}",
            direction,
            next,
            graph[next].room.id,
            if newly_visited { ", first visit" } else { "" }
        );
        MoveOutcome::Moved {
            node: next,
            newly_visited,
        }
    }

    /// Directions of every `step` so far, in order
    pub fn export_path(&self) -> Vec<Direction> {
        self.path.clone()
    }

    /// Initialize at `root` and replay `path`
    pub fn restore(graph: &MapGraph, root: NodeId, path: &[Direction]) -> Result<Self, GraphError> {
        let mut navigator = Self::new(graph, root)?;
        for &direction in path {
            navigator.step(graph, direction);
        }
        debug!(
            "restored navigator at {} after {} moves",
            navigator.current,
            path.len()
        );
        Ok(navigator)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn current(&self) -> NodeId {
        self.current
    }

    pub fn path(&self) -> &[Direction] {
        &self.path
    }

    pub fn visited(&self) -> &HashSet<NodeId> {
        &self.visited
    }

    pub fn has_visited(&self, node: NodeId) -> bool {
        self.visited.contains(&node)
    }

    /// True when the current node has nowhere further to go
    pub fn at_dead_end(&self, graph: &MapGraph) -> bool {
        graph.get(self.current).is_none_or(|n| n.exits.is_empty())
    }
}
