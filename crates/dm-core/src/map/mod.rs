//! Branching map system
//!
//! Contains the arena graph, room classification, the level-by-level
//! generator stages, layout, and the saved form of a map.

mod converge;
mod expand;
mod final_path;
mod generate;
mod graph;
mod hub;
mod layout;
mod room;
mod snapshot;

pub use converge::converge_frontier;
pub use expand::{Intent, decide_intent, expand_level, split_node};
pub use final_path::build_final_path;
pub use generate::generate_map;
pub use graph::{MapGraph, MapNode, NodeId, Position};
pub use hub::connect_hubs;
pub use layout::{arrange_level, center_layout, level_y, spread_horizontally};
pub use room::{HubKind, Room, RoomType, new_room};
pub use snapshot::{MapSnapshot, NodeRecord};
