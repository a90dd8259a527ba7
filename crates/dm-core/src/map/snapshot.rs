//! Flat, serializable form of a map graph
//!
//! Maps cannot be regenerated from a seed alone once an unseeded source was
//! used, so a save stores the concrete graph: one record per node with its
//! exits as node indices.

use serde::{Deserialize, Serialize};

use crate::error::GraphError;
use crate::{MAX_EXITS, is_known_room_id};

use super::{MapGraph, MapNode, NodeId, Position, Room, RoomType};

/// One node of a saved map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub index: usize,
    pub room_id: i32,
    pub room_type: RoomType,
    pub position: Position,
    pub exits: Vec<usize>,
    #[serde(default)]
    pub parent: Option<usize>,
    #[serde(default)]
    pub level: u32,
}

/// A saved map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSnapshot {
    pub root: usize,
    pub nodes: Vec<NodeRecord>,
}

impl MapGraph {
    pub fn to_snapshot(&self) -> MapSnapshot {
        let nodes = self
            .nodes()
            .map(|node| NodeRecord {
                index: node.id.index(),
                room_id: node.room.id,
                room_type: node.room.room_type,
                position: node.position,
                exits: node.exits.iter().map(|e| e.index()).collect(),
                parent: node.parent.map(NodeId::index),
                level: node.level,
            })
            .collect();

        MapSnapshot {
            root: self.root().map(NodeId::index).unwrap_or(0),
            nodes,
        }
    }

    /// Rebuild a graph, checking that it is one this crate could have made:
    /// dense indices, edges only towards later nodes, parents only earlier,
    /// at most two exits, and room ids the room table knows with the type
    /// that id implies.
    pub fn from_snapshot(snapshot: &MapSnapshot) -> Result<Self, GraphError> {
        if snapshot.nodes.is_empty() {
            return Err(GraphError::Empty);
        }
        let count = snapshot.nodes.len();
        if snapshot.root != 0 {
            return Err(GraphError::UnknownNode(snapshot.root));
        }

        let mut nodes = Vec::with_capacity(count);
        for (position, record) in snapshot.nodes.iter().enumerate() {
            if record.index != position {
                return Err(GraphError::RecordIndexMismatch {
                    position,
                    index: record.index,
                });
            }
            if !is_known_room_id(record.room_id) {
                return Err(GraphError::InvalidRoomId {
                    index: record.index,
                    room_id: record.room_id,
                });
            }
            if RoomType::for_room_id(record.room_id) != Some(record.room_type) {
                return Err(GraphError::RoomTypeMismatch {
                    index: record.index,
                    room_id: record.room_id,
                    room_type: record.room_type,
                });
            }
            if record.exits.len() > MAX_EXITS {
                return Err(GraphError::TooManyExits {
                    index: record.index,
                    count: record.exits.len(),
                });
            }
            for &exit in &record.exits {
                if exit >= count {
                    return Err(GraphError::UnknownNode(exit));
                }
                if exit <= record.index {
                    return Err(GraphError::BackwardEdge {
                        from: record.index,
                        to: exit,
                    });
                }
            }
            if let Some(parent) = record.parent {
                if parent >= record.index {
                    return Err(GraphError::ParentNotEarlier {
                        index: record.index,
                        parent,
                    });
                }
            }

            nodes.push(MapNode {
                id: NodeId(record.index as u32),
                room: Room::new(record.room_id, record.room_type),
                exits: record.exits.iter().map(|&e| NodeId(e as u32)).collect(),
                position: record.position,
                parent: record.parent.map(|p| NodeId(p as u32)),
                level: record.level,
            });
        }

        Ok(MapGraph::from_nodes(nodes))
    }
}
