//! A single run: one generated map and the navigator walking it

use tracing::info;

use crate::config::MapConfig;
use crate::error::{GenerationError, GraphError};
use crate::map::{MapGraph, MapNode, MapSnapshot, NodeId, generate_map};
use crate::navigator::{Direction, MoveOutcome, Navigator};
use crate::rng::GameRng;

/// Owns the map and the navigator for the current run
#[derive(Debug, Clone)]
pub struct Run {
    /// Seed the map was generated from, when known. A restored run keeps
    /// whatever the save recorded.
    pub seed: Option<u64>,
    pub graph: MapGraph,
    pub navigator: Navigator,
}

impl Run {
    /// Generate a fresh map and stand on its root
    pub fn generate(config: &MapConfig, rng: &mut GameRng) -> Result<Self, GenerationError> {
        let graph = generate_map(config, rng)?;
        let run = Self::from_graph(graph, Some(rng.seed()))?;
        info!("new run with seed {}", rng.seed());
        Ok(run)
    }

    /// Start a run on an existing graph, standing on its root
    pub fn from_graph(graph: MapGraph, seed: Option<u64>) -> Result<Self, GraphError> {
        let root = graph.root().ok_or(GraphError::Empty)?;
        let navigator = Navigator::new(&graph, root)?;
        Ok(Self {
            seed,
            graph,
            navigator,
        })
    }

    /// Rebuild a run from a saved map and the directions taken on it
    pub fn restore(snapshot: &MapSnapshot, path: &[Direction]) -> Result<Self, GraphError> {
        let graph = MapGraph::from_snapshot(snapshot)?;
        let root = graph.root().ok_or(GraphError::Empty)?;
        let navigator = Navigator::restore(&graph, root, path)?;
        Ok(Self {
            seed: None,
            graph,
            navigator,
        })
    }

    pub fn step(&mut self, direction: Direction) -> MoveOutcome {
        self.navigator.step(&self.graph, direction)
    }

    pub fn current(&self) -> NodeId {
        self.navigator.current()
    }

    pub fn current_node(&self) -> &MapNode {
        &self.graph[self.navigator.current()]
    }

    /// True once the terminal room has been reached
    pub fn is_complete(&self) -> bool {
        self.current_node().room.is_terminal()
    }
}
