//! Error types for map generation and graph reconstruction

use thiserror::Error;

use crate::map::{NodeId, RoomType};

/// Generation failures. Generation is never resumed: on error the caller
/// discards the partial graph and starts over.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("Invalid map config: {reason}")]
    InvalidConfig { reason: String },

    #[error("No free room id for a child of node {node} after {draws} draws")]
    RoomIdsExhausted { node: NodeId, draws: u32 },

    #[error("Node {node} already has the maximum number of exits")]
    ExitCapExceeded { node: NodeId },

    #[error("Frontier stuck at width {width} after {splits} forced splits")]
    ConvergenceStalled { width: usize, splits: u32 },

    #[error("Frontier is empty")]
    EmptyFrontier,

    #[error("Generated graph is unusable: {0}")]
    Graph(#[from] GraphError),
}

/// Errors addressing a graph or rebuilding one from saved records
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Graph has no nodes")]
    Empty,

    #[error("Unknown node index {0}")]
    UnknownNode(usize),

    #[error("Record at position {position} claims index {index}")]
    RecordIndexMismatch { position: usize, index: usize },

    #[error("Edge {from} -> {to} does not point to a later node")]
    BackwardEdge { from: usize, to: usize },

    #[error("Node {index} has {count} exits")]
    TooManyExits { index: usize, count: usize },

    #[error("Node {index} has invalid room id {room_id}")]
    InvalidRoomId { index: usize, room_id: i32 },

    #[error("Node {index} has room id {room_id} but type {room_type}")]
    RoomTypeMismatch {
        index: usize,
        room_id: i32,
        room_type: RoomType,
    },

    #[error("Node {index} names parent {parent}, which is not an earlier node")]
    ParentNotEarlier { index: usize, parent: usize },
}
