//! Hub wiring
//!
//! Three hub rooms sit one level below the deepest path end, at the left
//! edge, the middle and the right edge of the ends' horizontal extent. Every
//! path end is wired to the hub closest to it.

use strum::IntoEnumIterator;
use tracing::debug;

use crate::config::MapConfig;
use crate::error::GenerationError;

use super::layout::level_y;
use super::{HubKind, MapGraph, NodeId, Position, Room, RoomType};

/// Create the hubs and connect `ends` to them. Returns the hubs in
/// declaration order (plant, water, fire).
pub fn connect_hubs(
    graph: &mut MapGraph,
    ends: &[NodeId],
    config: &MapConfig,
) -> Result<Vec<NodeId>, GenerationError> {
    if ends.is_empty() {
        return Err(GenerationError::EmptyFrontier);
    }

    let (min_x, max_x) = ends
        .iter()
        .map(|&id| graph[id].position.x)
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), x| {
            (lo.min(x), hi.max(x))
        });
    let level = ends.iter().map(|&id| graph[id].level).max().unwrap_or(0) + 1;
    let y = level_y(level, config);
    let xs = [min_x, (min_x + max_x) / 2.0, max_x];

    let hubs: Vec<NodeId> = HubKind::iter()
        .zip(xs)
        .map(|(kind, x)| {
            let room = Room::forced(RoomType::MiniBoss).with_id(kind.room_id());
            graph.add_node(room, Position::new(x, y), None, level)
        })
        .collect();

    for &end in ends {
        let hub = nearest_hub(graph, &hubs, graph[end].position.x);
        graph.add_exit(end, hub)?;
        let node = graph.node_mut(hub);
        if node.parent.is_none() {
            node.parent = Some(end);
        }
    }

    debug!(
        "wired {} ends to hubs at x = {:.2}, {:.2}, {:.2}",
        ends.len(),
        xs[0],
        xs[1],
        xs[2]
    );
    Ok(hubs)
}

/// Hub with the smallest horizontal distance to `x`; ties go to the earlier hub
fn nearest_hub(graph: &MapGraph, hubs: &[NodeId], x: f32) -> NodeId {
    let mut best = hubs[0];
    let mut best_distance = (graph[best].position.x - x).abs();
    for &hub in &hubs[1..] {
        let distance = (graph[hub].position.x - x).abs();
        if distance < best_distance {
            best = hub;
            best_distance = distance;
        }
    }
    best
}
