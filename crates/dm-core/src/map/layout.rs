//! Node placement
//!
//! Each level is laid out left to right at a fixed spacing centered on x = 0,
//! one row below the previous level. Once the whole map exists,
//! [`center_layout`] shifts it so the widest extent is symmetric around 0.

use tracing::debug;

use crate::config::MapConfig;

use super::{MapGraph, NodeId};

/// Evenly space `nodes` around x = 0 and move them to `level` and its row
pub fn arrange_level(graph: &mut MapGraph, nodes: &[NodeId], level: u32, config: &MapConfig) {
    spread_horizontally(graph, nodes, config);
    let y = level_y(level, config);
    for &id in nodes {
        let node = graph.node_mut(id);
        node.position.y = y;
        node.level = level;
    }
}

/// Evenly space `nodes` around x = 0, leaving their rows alone
pub fn spread_horizontally(graph: &mut MapGraph, nodes: &[NodeId], config: &MapConfig) {
    let half_width = nodes.len().saturating_sub(1) as f32 / 2.0;
    for (slot, &id) in nodes.iter().enumerate() {
        graph.node_mut(id).position.x = (slot as f32 - half_width) * config.horizontal_spacing;
    }
}

/// Row for a generation index; the root sits at 0 and levels go down
pub fn level_y(level: u32, config: &MapConfig) -> f32 {
    -config.vertical_spacing * level as f32
}

/// Re-center every node reachable from `root` around the horizontal midpoint.
///
/// Returns how many nodes were moved.
pub fn center_layout(graph: &mut MapGraph, root: NodeId) -> usize {
    let visited = graph.reachable_from(root);
    if visited.is_empty() {
        return 0;
    }

    let (min_x, max_x) = visited
        .iter()
        .map(|&id| graph[id].position.x)
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), x| {
            (lo.min(x), hi.max(x))
        });
    let mid = (min_x + max_x) / 2.0;

    for &id in &visited {
        graph.node_mut(id).position.x -= mid;
    }

    debug!(
        "centered {} nodes, x span [{:.2}, {:.2}] shifted by {:.2}",
        visited.len(),
        min_x,
        max_x,
        mid
    );
    visited.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{Position, Room};

    fn graph_with_xs(xs: &[f32]) -> (MapGraph, Vec<NodeId>) {
        let mut graph = MapGraph::new();
        let root = graph.add_node(Room::regular(2).unwrap(), Position::new(xs[0], 0.0), None, 0);
        let mut ids = vec![root];
        for (i, &x) in xs.iter().enumerate().skip(1) {
            let id = graph.add_node(
                Room::regular(3 + i as i32).unwrap(),
                Position::new(x, -1.0),
                Some(root),
                1,
            );
            graph.add_exit(root, id).unwrap();
            ids.push(id);
        }
        (graph, ids)
    }

    #[test]
    fn test_arrange_level() {
        let (mut graph, ids) = graph_with_xs(&[0.0, 10.0, 20.0]);
        let config = MapConfig::default();

        arrange_level(&mut graph, &ids[1..], 2, &config);

        assert_eq!(graph[ids[1]].position, Position::new(-1.5, -5.0));
        assert_eq!(graph[ids[2]].position, Position::new(1.5, -5.0));
        assert_eq!(graph[ids[1]].level, 2);
    }

    #[test]
    fn test_single_node_level_is_centered() {
        let (mut graph, ids) = graph_with_xs(&[4.0]);
        arrange_level(&mut graph, &ids, 1, &MapConfig::default());
        assert_eq!(graph[ids[0]].position.x, 0.0);
    }

    #[test]
    fn test_center_layout_is_symmetric() {
        let (mut graph, ids) = graph_with_xs(&[1.0, -3.0, 7.0]);

        let moved = center_layout(&mut graph, ids[0]);

        assert_eq!(moved, 3);
        let xs: Vec<f32> = ids.iter().map(|&id| graph[id].position.x).collect();
        let min = xs.iter().cloned().fold(f32::INFINITY, f32::min);
        let max = xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        assert!((min + max).abs() < 1e-5);
        assert_eq!(xs, vec![-1.0, -5.0, 5.0]);
    }

    #[test]
    fn test_center_layout_idempotent() {
        let (mut graph, ids) = graph_with_xs(&[0.5, -2.25, 9.0]);

        center_layout(&mut graph, ids[0]);
        let once: Vec<f32> = ids.iter().map(|&id| graph[id].position.x).collect();
        center_layout(&mut graph, ids[0]);
        let twice: Vec<f32> = ids.iter().map(|&id| graph[id].position.x).collect();

        for (a, b) in once.iter().zip(&twice) {
            assert!((a - b).abs() < 1e-5);
        }
    }

    #[test]
    fn test_center_layout_ignores_unreachable() {
        let (mut graph, ids) = graph_with_xs(&[0.0, 2.0]);
        let stray = graph.add_node(Room::regular(9).unwrap(), Position::new(100.0, 0.0), None, 0);

        center_layout(&mut graph, ids[0]);

        assert_eq!(graph[stray].position.x, 100.0);
        assert_eq!(graph[ids[0]].position.x, -1.0);
    }
}
