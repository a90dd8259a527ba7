//! Final stretch: hubs to the terminal room

use tracing::debug;

use crate::TERMINAL_ROOM_ID;
use crate::config::MapConfig;
use crate::error::GenerationError;
use crate::rng::RandomSource;

use super::expand::expand_level;
use super::layout::level_y;
use super::{MapGraph, NodeId, Position, Room, RoomType};

/// Expand from the hubs for `config.post_hub_levels` levels, then wire every
/// resulting end to a single terminal room at x = 0. Returns the terminal.
pub fn build_final_path<R: RandomSource + ?Sized>(
    graph: &mut MapGraph,
    hubs: &[NodeId],
    config: &MapConfig,
    rng: &mut R,
) -> Result<NodeId, GenerationError> {
    if hubs.is_empty() {
        return Err(GenerationError::EmptyFrontier);
    }

    let mut frontier = hubs.to_vec();
    for _ in 0..config.post_hub_levels {
        frontier = expand_level(graph, &frontier, config, rng)?;
    }

    let level = frontier.iter().map(|&id| graph[id].level).max().unwrap_or(0) + 1;
    let room = Room::forced(RoomType::FinalBoss).with_id(TERMINAL_ROOM_ID);
    let terminal = graph.add_node(
        room,
        Position::new(0.0, level_y(level, config)),
        frontier.first().copied(),
        level,
    );

    for &end in &frontier {
        graph.add_exit(end, terminal)?;
    }

    debug!("terminal room at level {} joins {} ends", level, frontier.len());
    Ok(terminal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedSource;

    fn hubs() -> (MapGraph, Vec<NodeId>) {
        let mut graph = MapGraph::new();
        let hubs = [-1, -2, -3]
            .iter()
            .zip([-3.0, 0.0, 3.0])
            .map(|(&id, x)| {
                graph.add_node(
                    Room::forced(RoomType::MiniBoss).with_id(id),
                    Position::new(x, -10.0),
                    None,
                    4,
                )
            })
            .collect();
        (graph, hubs)
    }

    #[test]
    fn test_all_continue() {
        let (mut graph, hubs) = hubs();
        let mut rng = ScriptedSource::constant(0.9);

        let terminal = build_final_path(&mut graph, &hubs, &MapConfig::default(), &mut rng).unwrap();

        // 3 hubs + 2 levels of 3 + terminal
        assert_eq!(graph.len(), 10);
        assert_eq!(graph[terminal].room.id, TERMINAL_ROOM_ID);
        assert_eq!(graph[terminal].room.room_type, RoomType::FinalBoss);
        assert_eq!(graph[terminal].position, Position::new(0.0, -17.5));
        assert_eq!(graph[terminal].level, 7);

        let feeding = graph.nodes().filter(|n| n.exits.contains(&terminal)).count();
        assert_eq!(feeding, 3);
    }

    #[test]
    fn test_no_post_hub_levels() {
        let (mut graph, hubs) = hubs();
        let config = MapConfig {
            post_hub_levels: 0,
            ..Default::default()
        };
        let mut rng = ScriptedSource::constant(0.1);

        let terminal = build_final_path(&mut graph, &hubs, &config, &mut rng).unwrap();

        for hub in hubs {
            assert_eq!(graph[hub].exits, vec![terminal]);
        }
    }

    #[test]
    fn test_all_merge_converges() {
        let (mut graph, hubs) = hubs();
        let mut rng = ScriptedSource::constant(0.5);

        let terminal = build_final_path(&mut graph, &hubs, &MapConfig::default(), &mut rng).unwrap();

        // (-1,-2) share a child, -3 degrades to its own; then those two share one
        assert_eq!(graph[hubs[0]].exits, graph[hubs[1]].exits);
        assert_ne!(graph[hubs[0]].exits, graph[hubs[2]].exits);
        let feeding: Vec<_> = graph.nodes().filter(|n| n.exits.contains(&terminal)).collect();
        assert_eq!(feeding.len(), 1);
        assert_eq!(graph.len(), 3 + 2 + 1 + 1);
    }
}
