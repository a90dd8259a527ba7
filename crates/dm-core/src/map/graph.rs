//! Arena-backed map graph
//!
//! Every node lives in one `Vec` and edges are indices into it. A node may be
//! the exit of several predecessors (merges), so the graph is a DAG rather
//! than a tree; `parent` only records the node that first created it.

use std::fmt;
use std::ops::Index;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::MAX_EXITS;
use crate::error::GenerationError;

use super::Room;

/// Index of a node in its graph
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 2D layout coordinate. y decreases with depth.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A node of the map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapNode {
    pub id: NodeId,
    pub room: Room,
    /// Outgoing edges, in creation order
    pub exits: Vec<NodeId>,
    pub position: Position,
    /// First creator, used for ancestor id checks only
    pub parent: Option<NodeId>,
    /// Generation index; every edge goes to a strictly larger one
    pub level: u32,
}

impl MapNode {
    pub fn is_saturated(&self) -> bool {
        self.exits.len() >= MAX_EXITS
    }
}

/// The generated map
#[derive(Debug, Clone, Default)]
pub struct MapGraph {
    nodes: Vec<MapNode>,
}

impl MapGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first node ever added
    pub fn root(&self) -> Option<NodeId> {
        self.nodes.first().map(|n| n.id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&MapNode> {
        self.nodes.get(id.index())
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut MapNode {
        &mut self.nodes[id.index()]
    }

    pub fn nodes(&self) -> impl Iterator<Item = &MapNode> {
        self.nodes.iter()
    }

    /// Append a node with no exits
    pub fn add_node(
        &mut self,
        room: Room,
        position: Position,
        parent: Option<NodeId>,
        level: u32,
    ) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(MapNode {
            id,
            room,
            exits: Vec::new(),
            position,
            parent,
            level,
        });
        id
    }

    /// Add an edge `from -> to`, refusing to go past the exit cap
    pub fn add_exit(&mut self, from: NodeId, to: NodeId) -> Result<(), GenerationError> {
        let node = self.node_mut(from);
        if node.exits.len() >= MAX_EXITS {
            return Err(GenerationError::ExitCapExceeded { node: from });
        }
        node.exits.push(to);
        Ok(())
    }

    /// Room ids on the parent chain of `id`, `id` included
    pub fn ancestor_room_ids(&self, id: NodeId) -> HashSet<i32> {
        let mut ids = HashSet::new();
        let mut cursor = self.get(id);
        while let Some(node) = cursor {
            ids.insert(node.room.id);
            // Parents always precede their children, which also rules out cycles
            cursor = node.parent.filter(|p| *p < node.id).and_then(|p| self.get(p));
        }
        ids
    }

    /// Every node reachable from `start`, in depth-first discovery order.
    ///
    /// Merge targets are reachable along several edges, so a visited set
    /// guards against processing them twice.
    pub fn reachable_from(&self, start: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        if self.get(start).is_none() {
            return order;
        }

        let mut visited = HashSet::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            order.push(id);
            // Reverse so the first exit is explored first
            for &exit in self[id].exits.iter().rev() {
                if !visited.contains(&exit) {
                    stack.push(exit);
                }
            }
        }
        order
    }

    pub fn hubs(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.room.is_hub())
            .map(|n| n.id)
            .collect()
    }

    pub fn terminal(&self) -> Option<NodeId> {
        self.nodes.iter().find(|n| n.room.is_terminal()).map(|n| n.id)
    }

    /// Nodes with no exits
    pub fn leaves(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.exits.is_empty())
            .map(|n| n.id)
            .collect()
    }

    /// Deepest generation index in the graph
    pub fn max_level(&self) -> u32 {
        self.nodes.iter().map(|n| n.level).max().unwrap_or(0)
    }

    pub(crate) fn from_nodes(nodes: Vec<MapNode>) -> Self {
        Self { nodes }
    }
}

impl Index<NodeId> for MapGraph {
    type Output = MapNode;

    fn index(&self, id: NodeId) -> &MapNode {
        &self.nodes[id.index()]
    }
}
