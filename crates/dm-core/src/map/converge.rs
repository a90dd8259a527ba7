//! Frontier convergence
//!
//! The hub stage needs at least `min_hub_entries` path ends. Narrow frontiers
//! are widened by force-splitting random members until they are wide enough.

use tracing::{debug, warn};

use crate::config::MapConfig;
use crate::error::GenerationError;
use crate::rng::RandomSource;

use super::expand::split_node;
use super::layout::spread_horizontally;
use super::{MapGraph, NodeId};

/// Widen `frontier` to `config.min_hub_entries` nodes.
///
/// Each split replaces one member, in place, by its two new children. If any
/// split happened the frontier is re-spaced evenly so every hub position ends
/// up nearest to at least one path end.
pub fn converge_frontier<R: RandomSource + ?Sized>(
    graph: &mut MapGraph,
    mut frontier: Vec<NodeId>,
    config: &MapConfig,
    rng: &mut R,
) -> Result<Vec<NodeId>, GenerationError> {
    if frontier.is_empty() {
        return Err(GenerationError::EmptyFrontier);
    }

    let mut splits = 0;
    while frontier.len() < config.min_hub_entries {
        if splits >= config.max_convergence_splits {
            warn!(
                "convergence gave up at width {} after {} splits",
                frontier.len(),
                splits
            );
            return Err(GenerationError::ConvergenceStalled {
                width: frontier.len(),
                splits,
            });
        }

        let pick = rng.uniform_int(0, frontier.len() as i32 - 1) as usize;
        let children = split_node(graph, frontier[pick], config, rng)?;
        frontier.splice(pick..=pick, children);
        splits += 1;
    }

    if splits > 0 {
        spread_horizontally(graph, &frontier, config);
        debug!(
            "converged frontier to {} ends with {} splits",
            frontier.len(),
            splits
        );
    }
    Ok(frontier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{Position, Room};
    use crate::rng::ScriptedSource;

    fn single_leaf() -> (MapGraph, NodeId) {
        let mut graph = MapGraph::new();
        let root = graph.add_node(Room::regular(2).unwrap(), Position::default(), None, 0);
        let leaf = graph.add_node(Room::regular(3).unwrap(), Position::new(0.0, -2.5), Some(root), 1);
        graph.add_exit(root, leaf).unwrap();
        (graph, leaf)
    }

    #[test]
    fn test_wide_frontier_untouched() {
        let (mut graph, leaf) = single_leaf();
        let config = MapConfig {
            min_hub_entries: 3,
            ..Default::default()
        };
        let others: Vec<NodeId> = (0..2)
            .map(|i| graph.add_node(Room::regular(10 + i).unwrap(), Position::default(), None, 1))
            .collect();
        let frontier = vec![leaf, others[0], others[1]];
        let before = graph.len();

        let mut rng = ScriptedSource::constant(0.5);
        let out = converge_frontier(&mut graph, frontier.clone(), &config, &mut rng).unwrap();

        assert_eq!(out, frontier);
        assert_eq!(graph.len(), before);
    }

    #[test]
    fn test_widens_single_node() {
        let (mut graph, leaf) = single_leaf();
        // Index picks are wrapped into range, so 0 always picks the first end
        let mut rng = ScriptedSource::new(vec![], vec![0, 11, 12, 13, 14]);

        let out = converge_frontier(&mut graph, vec![leaf], &MapConfig::default(), &mut rng).unwrap();

        assert_eq!(out.len(), 3);
        assert_eq!(graph[leaf].exits.len(), 2);
        // First child of the leaf was split again, second is still an end
        let first = graph[leaf].exits[0];
        assert_eq!(graph[first].exits, vec![out[0], out[1]]);
        assert_eq!(out[2], graph[leaf].exits[1]);

        let xs: Vec<f32> = out.iter().map(|&id| graph[id].position.x).collect();
        assert_eq!(xs, vec![-3.0, 0.0, 3.0]);
    }

    #[test]
    fn test_stall_is_reported() {
        let (mut graph, leaf) = single_leaf();
        let config = MapConfig {
            min_hub_entries: 5,
            max_convergence_splits: 2,
            ..Default::default()
        };
        let mut rng = ScriptedSource::new(vec![], vec![0, 11, 12, 13, 14]);

        let err = converge_frontier(&mut graph, vec![leaf], &config, &mut rng).unwrap_err();
        assert_eq!(
            err,
            GenerationError::ConvergenceStalled {
                width: 3,
                splits: 2
            }
        );
    }

    #[test]
    fn test_empty_frontier() {
        let mut graph = MapGraph::new();
        let mut rng = ScriptedSource::constant(0.5);
        assert_eq!(
            converge_frontier(&mut graph, Vec::new(), &MapConfig::default(), &mut rng),
            Err(GenerationError::EmptyFrontier)
        );
    }
}
