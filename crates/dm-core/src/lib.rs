//! dm-core: branching dungeon map generation and traversal
//!
//! A map is built level by level from a single root, converges onto three
//! hub rooms, and ends in one terminal room. A [`Navigator`] walks the
//! finished map with left/right input and records every move so a run can
//! be saved and replayed.
//!
//! Nothing here performs I/O; randomness comes in through [`RandomSource`].

pub mod config;
pub mod error;
pub mod map;
pub mod navigator;
pub mod run;

mod consts;
mod rng;

pub use config::MapConfig;
pub use consts::*;
pub use error::{GenerationError, GraphError};
pub use navigator::{Direction, InvalidDirection, MoveOutcome, Navigator};
pub use rng::{GameRng, RandomSource, ScriptedSource};
pub use run::Run;
