//! Room types and the room classifier
//!
//! Regular rooms get a random id in 2..=20; the id range decides the type:
//! - 2-5 Normal, 6-10 Grass, 11-15 Water, 16-20 Fire
//!
//! Hub and terminal rooms are created with a forced type and then given their
//! fixed negative id.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};
use tracing::warn;

use crate::config::MapConfig;
use crate::error::GenerationError;
use crate::rng::RandomSource;
use crate::{FORCED_ROOM_ID, HUB_ROOM_IDS, MAX_ROOM_ID, MIN_ROOM_ID, ROOM_ID_SPAN, TERMINAL_ROOM_ID};

use super::{MapGraph, NodeId};

/// Draw count past which the classifier complains
const SLOW_DRAW_WARNING: u32 = 64;

/// Room categories
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum RoomType {
    #[default]
    Normal,
    Grass,
    Water,
    Fire,
    MiniBoss,
    FinalBoss,
}

impl RoomType {
    /// Type of a regular room id, `None` outside 2..=20
    pub fn from_room_id(id: i32) -> Option<Self> {
        match id {
            2..=5 => Some(RoomType::Normal),
            6..=10 => Some(RoomType::Grass),
            11..=15 => Some(RoomType::Water),
            16..=20 => Some(RoomType::Fire),
            _ => None,
        }
    }

    /// Type any room with `id` must have, hub and terminal ids included
    pub fn for_room_id(id: i32) -> Option<Self> {
        if HUB_ROOM_IDS.contains(&id) {
            Some(RoomType::MiniBoss)
        } else if id == TERMINAL_ROOM_ID {
            Some(RoomType::FinalBoss)
        } else {
            Self::from_room_id(id)
        }
    }

    pub fn is_boss(self) -> bool {
        matches!(self, RoomType::MiniBoss | RoomType::FinalBoss)
    }
}

/// Hub variants, in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum HubKind {
    Plant,
    Water,
    Fire,
}

impl HubKind {
    pub fn room_id(self) -> i32 {
        match self {
            HubKind::Plant => HUB_ROOM_IDS[0],
            HubKind::Water => HUB_ROOM_IDS[1],
            HubKind::Fire => HUB_ROOM_IDS[2],
        }
    }

    pub fn from_room_id(id: i32) -> Option<Self> {
        match id {
            -1 => Some(HubKind::Plant),
            -2 => Some(HubKind::Water),
            -3 => Some(HubKind::Fire),
            _ => None,
        }
    }
}

/// A room: its lookup id and its category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Room {
    pub id: i32,
    pub room_type: RoomType,
}

impl Room {
    pub fn new(id: i32, room_type: RoomType) -> Self {
        Self { id, room_type }
    }

    /// Regular room for `id`, classified by range
    pub fn regular(id: i32) -> Option<Self> {
        RoomType::from_room_id(id).map(|room_type| Self { id, room_type })
    }

    /// Room of a forced type with the synthetic placeholder id
    pub fn forced(room_type: RoomType) -> Self {
        Self {
            id: FORCED_ROOM_ID,
            room_type,
        }
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }

    pub fn is_hub(&self) -> bool {
        HUB_ROOM_IDS.contains(&self.id)
    }

    pub fn is_terminal(&self) -> bool {
        self.id == TERMINAL_ROOM_ID
    }

    pub fn hub_kind(&self) -> Option<HubKind> {
        HubKind::from_room_id(self.id)
    }
}

/// Create the room for a new node.
///
/// With `forced`, returns a placeholder-id room of that type. Otherwise draws
/// ids until one is not used anywhere on `current`'s parent chain (including
/// `current` itself). Gives up after `config.max_id_draws` draws.
pub fn new_room<R: RandomSource + ?Sized>(
    graph: &MapGraph,
    forced: Option<RoomType>,
    current: Option<NodeId>,
    config: &MapConfig,
    rng: &mut R,
) -> Result<Room, GenerationError> {
    if let Some(room_type) = forced {
        return Ok(Room::forced(room_type));
    }

    let used: HashSet<i32> = match current {
        Some(node) => graph.ancestor_room_ids(node),
        None => HashSet::new(),
    };
    let node = current.unwrap_or_default();

    let free = (MIN_ROOM_ID..=MAX_ROOM_ID)
        .filter(|id| !used.contains(id))
        .count();
    if free == 0 {
        return Err(GenerationError::RoomIdsExhausted { node, draws: 0 });
    }

    for draw in 1..=config.max_id_draws {
        let id = rng.uniform_int(MIN_ROOM_ID, MAX_ROOM_ID);
        if used.contains(&id) {
            continue;
        }
        if draw > SLOW_DRAW_WARNING {
            warn!(
                "room id for child of node {} took {} draws ({} of {} ids free)",
                node, draw, free, ROOM_ID_SPAN
            );
        }
        if let Some(room) = Room::regular(id) {
            return Ok(room);
        }
    }

    Err(GenerationError::RoomIdsExhausted {
        node,
        draws: config.max_id_draws,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Position;
    use crate::rng::{GameRng, ScriptedSource};

    #[test]
    fn test_classification_ranges() {
        assert_eq!(RoomType::from_room_id(2), Some(RoomType::Normal));
        assert_eq!(RoomType::from_room_id(5), Some(RoomType::Normal));
        assert_eq!(RoomType::from_room_id(6), Some(RoomType::Grass));
        assert_eq!(RoomType::from_room_id(10), Some(RoomType::Grass));
        assert_eq!(RoomType::from_room_id(11), Some(RoomType::Water));
        assert_eq!(RoomType::from_room_id(15), Some(RoomType::Water));
        assert_eq!(RoomType::from_room_id(16), Some(RoomType::Fire));
        assert_eq!(RoomType::from_room_id(20), Some(RoomType::Fire));
        assert_eq!(RoomType::from_room_id(1), None);
        assert_eq!(RoomType::from_room_id(21), None);
        assert_eq!(RoomType::from_room_id(-1), None);
    }

    #[test]
    fn test_type_for_special_ids() {
        assert_eq!(RoomType::for_room_id(-2), Some(RoomType::MiniBoss));
        assert_eq!(RoomType::for_room_id(TERMINAL_ROOM_ID), Some(RoomType::FinalBoss));
        assert_eq!(RoomType::for_room_id(13), Some(RoomType::Water));
        assert_eq!(RoomType::for_room_id(FORCED_ROOM_ID), None);
    }

    #[test]
    fn test_forced_room() {
        let graph = MapGraph::new();
        let mut rng = GameRng::new(3);
        let room = new_room(
            &graph,
            Some(RoomType::FinalBoss),
            None,
            &MapConfig::default(),
            &mut rng,
        )
        .unwrap();
        assert_eq!(room.id, FORCED_ROOM_ID);
        assert_eq!(room.room_type, RoomType::FinalBoss);
        assert!(room.with_id(TERMINAL_ROOM_ID).is_terminal());
    }

    #[test]
    fn test_skips_ancestor_ids() {
        let mut graph = MapGraph::new();
        let root = graph.add_node(Room::regular(7).unwrap(), Position::default(), None, 0);
        let child = graph.add_node(Room::regular(12).unwrap(), Position::default(), Some(root), 1);

        // 7 and 12 are taken, so the third draw wins
        let mut rng = ScriptedSource::new(vec![], vec![7, 12, 3]);
        let room = new_room(&graph, None, Some(child), &MapConfig::default(), &mut rng).unwrap();
        assert_eq!(room.id, 3);
        assert_eq!(room.room_type, RoomType::Normal);
    }

    #[test]
    fn test_retry_cap() {
        let mut graph = MapGraph::new();
        let root = graph.add_node(Room::regular(7).unwrap(), Position::default(), None, 0);

        let config = MapConfig {
            max_id_draws: 5,
            ..Default::default()
        };
        let mut rng = ScriptedSource::new(vec![], vec![7]);
        let err = new_room(&graph, None, Some(root), &config, &mut rng).unwrap_err();
        assert_eq!(
            err,
            GenerationError::RoomIdsExhausted {
                node: root,
                draws: 5
            }
        );
    }

    #[test]
    fn test_exhausted_id_space() {
        let mut graph = MapGraph::new();
        let mut parent = None;
        for (level, id) in (MIN_ROOM_ID..=MAX_ROOM_ID).enumerate() {
            let node = graph.add_node(
                Room::regular(id).unwrap(),
                Position::default(),
                parent,
                level as u32,
            );
            parent = Some(node);
        }

        let mut rng = GameRng::new(1);
        let err = new_room(&graph, None, parent, &MapConfig::default(), &mut rng).unwrap_err();
        assert!(matches!(
            err,
            GenerationError::RoomIdsExhausted { draws: 0, .. }
        ));
    }

    #[test]
    fn test_hub_kinds() {
        assert_eq!(HubKind::Plant.room_id(), -1);
        assert_eq!(HubKind::Water.room_id(), -2);
        assert_eq!(HubKind::Fire.room_id(), -3);
        assert_eq!(HubKind::from_room_id(-2), Some(HubKind::Water));
        assert!(Room::forced(RoomType::MiniBoss).with_id(-3).is_hub());
    }
}
