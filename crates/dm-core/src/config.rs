//! Generation parameters

use serde::{Deserialize, Serialize};

use crate::{HUB_COUNT, ROOM_ID_SPAN};
use crate::error::GenerationError;

/// Tunable shape of a generated map.
///
/// Missing fields in a config file fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Expansion passes between the root's first split and the hubs
    pub pre_hub_levels: u32,
    /// Expansion passes between the hubs and the terminal room
    pub post_hub_levels: u32,
    /// Frontier width convergence must reach before hubs are wired
    pub min_hub_entries: usize,
    /// Horizontal distance between neighbours on one level
    pub horizontal_spacing: f32,
    /// Vertical distance between levels
    pub vertical_spacing: f32,
    /// Id draws the classifier attempts before giving up
    pub max_id_draws: u32,
    /// Forced splits convergence attempts before giving up
    pub max_convergence_splits: u32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            pre_hub_levels: 2,
            post_hub_levels: 2,
            min_hub_entries: 3,
            horizontal_spacing: 3.0,
            vertical_spacing: 2.5,
            max_id_draws: 256,
            max_convergence_splits: 64,
        }
    }
}

impl MapConfig {
    /// Most regular rooms one parent chain can hold: the root, the first
    /// split, every pre-hub level, one level per forced convergence split
    /// (at most `min_hub_entries - 1` when a single path is left) and every
    /// post-hub level. Hubs and the terminal use fixed ids and don't count.
    pub fn deepest_room_chain(&self) -> usize {
        (2 + self.pre_hub_levels as usize + self.post_hub_levels as usize)
            .saturating_add(self.min_hub_entries.saturating_sub(1))
    }

    pub fn validate(&self) -> Result<(), GenerationError> {
        let invalid = |reason: &str| {
            Err(GenerationError::InvalidConfig {
                reason: reason.to_string(),
            })
        };

        if !(self.horizontal_spacing.is_finite() && self.horizontal_spacing > 0.0) {
            return invalid("horizontal_spacing must be a positive number");
        }
        if !(self.vertical_spacing.is_finite() && self.vertical_spacing > 0.0) {
            return invalid("vertical_spacing must be a positive number");
        }
        // Fewer entries than hubs would leave a hub with no way in
        if self.min_hub_entries < HUB_COUNT {
            return invalid("min_hub_entries must be at least the hub count");
        }
        // Ids may not repeat along a chain, so a deeper one can run out
        if self.deepest_room_chain() > ROOM_ID_SPAN {
            return Err(GenerationError::InvalidConfig {
                reason: format!(
                    "levels allow a chain of {} rooms but only {} room ids exist",
                    self.deepest_room_chain(),
                    ROOM_ID_SPAN
                ),
            });
        }
        if self.max_id_draws == 0 {
            return invalid("max_id_draws must be at least 1");
        }
        if self.max_convergence_splits == 0 {
            return invalid("max_convergence_splits must be at least 1");
        }
        Ok(())
    }
}
