//! Whole-map generation
//!
//! root -> two children -> `pre_hub_levels` expansions -> convergence ->
//! hubs -> `post_hub_levels` expansions -> terminal -> centering

use tracing::info;

use crate::config::MapConfig;
use crate::error::GenerationError;
use crate::rng::RandomSource;

use super::converge::converge_frontier;
use super::expand::{expand_level, split_node};
use super::final_path::build_final_path;
use super::hub::connect_hubs;
use super::layout::{arrange_level, center_layout};
use super::room::new_room;
use super::{MapGraph, Position};

/// Generate a complete map. The root is `graph.root()`.
///
/// Any failure aborts the whole map; there is nothing to resume.
pub fn generate_map<R: RandomSource + ?Sized>(
    config: &MapConfig,
    rng: &mut R,
) -> Result<MapGraph, GenerationError> {
    config.validate()?;

    let mut graph = MapGraph::new();
    let root_room = new_room(&graph, None, None, config, rng)?;
    let root = graph.add_node(root_room, Position::default(), None, 0);

    let mut frontier = split_node(&mut graph, root, config, rng)?;
    arrange_level(&mut graph, &frontier, 1, config);

    for _ in 0..config.pre_hub_levels {
        frontier = expand_level(&mut graph, &frontier, config, rng)?;
    }

    let ends = converge_frontier(&mut graph, frontier, config, rng)?;
    let hubs = connect_hubs(&mut graph, &ends, config)?;
    let terminal = build_final_path(&mut graph, &hubs, config, rng)?;
    let placed = center_layout(&mut graph, root);

    info!(
        "generated map: {} nodes ({} placed), {} hub entries, terminal {} at level {}",
        graph.len(),
        placed,
        ends.len(),
        terminal,
        graph[terminal].level
    );
    Ok(graph)
}
