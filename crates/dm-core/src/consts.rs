//! Fixed map constants
//!
//! Room ids double as the key an external room table is indexed by, so these
//! values are part of the contract with whatever instantiates the rooms.

/// Regular room ids are drawn from this inclusive range
pub const MIN_ROOM_ID: i32 = 2;
pub const MAX_ROOM_ID: i32 = 20;

/// Number of distinct regular room ids
pub const ROOM_ID_SPAN: usize = (MAX_ROOM_ID - MIN_ROOM_ID + 1) as usize;

/// Hub rooms (plant, water, fire), in declaration order
pub const HUB_ROOM_IDS: [i32; HUB_COUNT] = [-1, -2, -3];
pub const HUB_COUNT: usize = 3;

/// The single terminal room
pub const TERMINAL_ROOM_ID: i32 = -99;

/// Id handed out for rooms of a forced type before the caller assigns the
/// real hub/terminal id. Never unique, never looked up.
pub const FORCED_ROOM_ID: i32 = -10_000;

/// Outgoing edge cap for every node
pub const MAX_EXITS: usize = 2;

/// Returns true if `id` is something the room table knows how to build.
pub fn is_known_room_id(id: i32) -> bool {
    (MIN_ROOM_ID..=MAX_ROOM_ID).contains(&id)
        || HUB_ROOM_IDS.contains(&id)
        || id == TERMINAL_ROOM_ID
}
