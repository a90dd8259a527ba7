//! Level expansion
//!
//! Turns one frontier into the next. Every frontier node first gets an
//! intent (split, merge or continue); the intents are then carried out left
//! to right, with merges looking at the already-decided neighbours to find
//! something concrete to join.

use tracing::debug;

use crate::MAX_EXITS;
use crate::config::MapConfig;
use crate::error::GenerationError;
use crate::rng::RandomSource;

use super::layout::{arrange_level, level_y};
use super::room::new_room;
use super::{MapGraph, NodeId, Position};

/// What a frontier node does on this level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Split,
    Merge,
    Continue,
}

impl Intent {
    /// Intent for a roll in [0, 1): thirds for split, merge, continue
    pub fn from_roll(roll: f64) -> Self {
        if roll < 1.0 / 3.0 {
            Intent::Split
        } else if roll < 2.0 / 3.0 {
            Intent::Merge
        } else {
            Intent::Continue
        }
    }
}

/// Decide one node's intent. A node that is already full can only merge.
pub fn decide_intent<R: RandomSource + ?Sized>(
    graph: &MapGraph,
    node: NodeId,
    rng: &mut R,
) -> Intent {
    if graph[node].is_saturated() {
        return Intent::Merge;
    }
    Intent::from_roll(rng.uniform_float())
}

/// Create one new child of `parent` at `position` and link it
pub(crate) fn spawn_child<R: RandomSource + ?Sized>(
    graph: &mut MapGraph,
    parent: NodeId,
    position: Position,
    config: &MapConfig,
    rng: &mut R,
) -> Result<NodeId, GenerationError> {
    let room = new_room(graph, None, Some(parent), config, rng)?;
    let level = graph[parent].level + 1;
    let child = graph.add_node(room, position, Some(parent), level);
    graph.add_exit(parent, child)?;
    Ok(child)
}

/// Give `node` as many new children as its free exit slots allow, at most two.
///
/// Two children straddle the parent horizontally; a single child sits
/// straight below it.
pub fn split_node<R: RandomSource + ?Sized>(
    graph: &mut MapGraph,
    node: NodeId,
    config: &MapConfig,
    rng: &mut R,
) -> Result<Vec<NodeId>, GenerationError> {
    let remaining = MAX_EXITS as isize - graph[node].exits.len() as isize;
    let origin = graph[node].position;
    let y = level_y(graph[node].level + 1, config);

    if remaining < 2 {
        // Also covers a full node; the exit cap rejects that child
        let child = spawn_child(graph, node, Position::new(origin.x, y), config, rng)?;
        return Ok(vec![child]);
    }

    let offset = config.horizontal_spacing / 2.0;
    let left = spawn_child(graph, node, Position::new(origin.x - offset, y), config, rng)?;
    let right = spawn_child(graph, node, Position::new(origin.x + offset, y), config, rng)?;
    Ok(vec![left, right])
}

/// Expand `frontier` by one level and return the next frontier, laid out.
///
/// Merge resolution, in order of preference:
/// 1. the previous node continued: share its new child
/// 2. the next node also merges: both get one new shared child, and the next
///    node is consumed
/// 3. otherwise continue with a child of its own
///
/// Frontier nodes are expected to be fresh. One that is already full can
/// only be forced to merge, which fails with `ExitCapExceeded`.
pub fn expand_level<R: RandomSource + ?Sized>(
    graph: &mut MapGraph,
    frontier: &[NodeId],
    config: &MapConfig,
    rng: &mut R,
) -> Result<Vec<NodeId>, GenerationError> {
    if frontier.is_empty() {
        return Err(GenerationError::EmptyFrontier);
    }

    let intents: Vec<Intent> = frontier
        .iter()
        .map(|&node| decide_intent(graph, node, rng))
        .collect();
    let level = frontier
        .iter()
        .map(|&node| graph[node].level)
        .max()
        .unwrap_or(0)
        + 1;

    // Child made by each Continue, for a following Merge to reuse
    let mut continued: Vec<Option<NodeId>> = vec![None; frontier.len()];
    let mut next = Vec::with_capacity(frontier.len() * 2);

    let mut i = 0;
    while i < frontier.len() {
        let node = frontier[i];
        let below = Position::new(graph[node].position.x, level_y(level, config));

        match intents[i] {
            Intent::Merge if graph[node].is_saturated() => {
                // A full node has no slot left to merge through
                return Err(GenerationError::ExitCapExceeded { node });
            }
            Intent::Merge => {
                let shared = if i > 0 && intents[i - 1] == Intent::Continue {
                    continued[i - 1]
                } else {
                    None
                };
                let joins_next = i + 1 < frontier.len()
                    && intents[i + 1] == Intent::Merge
                    && !graph[frontier[i + 1]].is_saturated();

                if let Some(child) = shared {
                    graph.add_exit(node, child)?;
                } else if joins_next {
                    let child = spawn_child(graph, node, below, config, rng)?;
                    graph.add_exit(frontier[i + 1], child)?;
                    next.push(child);
                    i += 1;
                } else {
                    let child = spawn_child(graph, node, below, config, rng)?;
                    next.push(child);
                }
            }
            Intent::Split => {
                next.extend(split_node(graph, node, config, rng)?);
            }
            Intent::Continue => {
                let child = spawn_child(graph, node, below, config, rng)?;
                continued[i] = Some(child);
                next.push(child);
            }
        }
        i += 1;
    }

    arrange_level(graph, &next, level, config);
    debug!(
        "level {}: {} -> {} nodes, intents {:?}",
        level,
        frontier.len(),
        next.len(),
        intents
    );
    Ok(next)
}
