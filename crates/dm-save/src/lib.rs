//! dm-save: Save/restore of dungeon map runs
//!
//! A map cannot be regenerated once it came from an entropy-seeded source,
//! so a save holds the whole graph as node records, the directions walked
//! so far and the index of the node the walk ended on. Loading rebuilds the
//! graph, replays the directions and checks that they land on that node.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use dm_core::map::MapSnapshot;
use dm_core::{Direction, GraphError, Run};

/// Current save file format version
pub const SAVE_VERSION: u32 = 1;

/// Save/restore errors
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Save file not found")]
    NotFound,

    #[error("Save file corrupted: {0}")]
    Corrupted(String),

    #[error("Incompatible save version: expected {expected}, found {found}")]
    IncompatibleVersion { expected: u32, found: u32 },

    #[error("Invalid save file header")]
    InvalidHeader,

    #[error("Saved map is invalid: {0}")]
    Graph(#[from] GraphError),

    #[error("Replayed path ends on node {found}, save says {expected}")]
    PathMismatch { expected: usize, found: usize },
}

/// Save file header for versioning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveHeader {
    /// Magic identifier
    pub magic: String,
    /// Save format version
    pub version: u32,
    /// Seed the map came from, if it was recorded
    pub seed: Option<u64>,
    pub node_count: usize,
    /// Number of recorded moves
    pub moves: usize,
    /// Timestamp of save
    pub timestamp: u64,
}

impl SaveHeader {
    const MAGIC: &'static str = "DMAP";

    pub fn new(run: &Run) -> Self {
        Self {
            magic: Self::MAGIC.to_string(),
            version: SAVE_VERSION,
            seed: run.seed,
            node_count: run.graph.len(),
            moves: run.navigator.path().len(),
            timestamp: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }

    pub fn validate(&self) -> Result<(), SaveError> {
        if self.magic != Self::MAGIC {
            return Err(SaveError::InvalidHeader);
        }
        if self.version != SAVE_VERSION {
            return Err(SaveError::IncompatibleVersion {
                expected: SAVE_VERSION,
                found: self.version,
            });
        }
        Ok(())
    }
}

/// Complete save file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveFile {
    pub header: SaveHeader,
    pub map: MapSnapshot,
    pub path: Vec<Direction>,
    /// Index of the node the player stands on
    pub current: usize,
}

impl SaveFile {
    pub fn new(run: &Run) -> Self {
        Self {
            header: SaveHeader::new(run),
            map: run.graph.to_snapshot(),
            path: run.navigator.export_path(),
            current: run.current().index(),
        }
    }

    /// Rebuild the run and check the replay lands where the save says
    pub fn into_run(self) -> Result<Run, SaveError> {
        self.header.validate()?;
        if self.header.node_count != self.map.nodes.len() {
            return Err(SaveError::Corrupted(format!(
                "header lists {} nodes, map has {}",
                self.header.node_count,
                self.map.nodes.len()
            )));
        }

        let mut run = Run::restore(&self.map, &self.path)?;
        let found = run.current().index();
        if found != self.current {
            warn!(
                "replaying {} moves reached node {} instead of {}",
                self.path.len(),
                found,
                self.current
            );
            return Err(SaveError::PathMismatch {
                expected: self.current,
                found,
            });
        }
        run.seed = self.header.seed;
        Ok(run)
    }
}

/// Save a run to a file
pub fn save_run(run: &Run, path: impl AsRef<Path>) -> Result<(), SaveError> {
    let save_file = SaveFile::new(run);

    let file = File::create(path.as_ref())?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &save_file)?;
    info!(
        "saved run ({} nodes, {} moves) to {}",
        save_file.header.node_count,
        save_file.header.moves,
        path.as_ref().display()
    );
    Ok(())
}

/// Load a run from a file
pub fn load_run(path: impl AsRef<Path>) -> Result<Run, SaveError> {
    let file = File::open(path.as_ref()).map_err(|_| SaveError::NotFound)?;
    let reader = BufReader::new(file);
    let save_file: SaveFile = serde_json::from_reader(reader)?;

    let run = save_file.into_run()?;
    info!(
        "loaded run from {}, at node {}",
        path.as_ref().display(),
        run.current()
    );
    Ok(run)
}

/// Load only the header from a save file (for listing saves)
pub fn load_header(path: impl AsRef<Path>) -> Result<SaveHeader, SaveError> {
    // Other fields are skipped, not parsed into a graph
    #[derive(Deserialize)]
    struct HeaderOnly {
        header: SaveHeader,
    }

    let file = File::open(path).map_err(|_| SaveError::NotFound)?;
    let reader = BufReader::new(file);
    let HeaderOnly { header } = serde_json::from_reader(reader)?;
    header.validate()?;
    Ok(header)
}

/// Check if a save file exists
pub fn save_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().exists()
}

/// Delete a save file
pub fn delete_save(path: impl AsRef<Path>) -> Result<(), SaveError> {
    std::fs::remove_file(path)?;
    Ok(())
}

fn save_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("dungeon-map");
    path.push("saves");
    path
}

/// Get the default save path for a run name
pub fn default_save_path(name: &str) -> PathBuf {
    let mut path = save_dir();
    std::fs::create_dir_all(&path).ok();
    path.push(format!("{}.json", name));
    path
}

/// List all save files in the default save directory, newest first
pub fn list_saves() -> Result<Vec<(PathBuf, SaveHeader)>, SaveError> {
    let dir = save_dir();
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut saves = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|e| e == "json") {
            match load_header(&path) {
                Ok(header) => saves.push((path, header)),
                Err(e) => warn!("skipping {}: {}", path.display(), e),
            }
        }
    }

    saves.sort_by(|a, b| b.1.timestamp.cmp(&a.1.timestamp));
    Ok(saves)
}
