//! Branching dungeon maps in Rust
//!
//! Command line entry point: generate a map, walk it, inspect a saved run.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use dm_core::{Direction, GameRng, MapConfig, MoveOutcome, Run};
use dm_save::{default_save_path, list_saves, load_run, save_run};

/// Generate and walk branching dungeon maps
#[derive(Parser, Debug)]
#[command(name = "dungeon-map")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a new map and print it
    Generate {
        /// Seed for the map; random when omitted
        #[arg(short, long)]
        seed: Option<u64>,

        /// JSON file with map parameters
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the new run to this file
        #[arg(long, conflicts_with = "name")]
        save: Option<PathBuf>,

        /// Write the new run to the default save directory under this name
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Walk a saved run; MOVES is a string of L and R
    Walk {
        #[arg(long)]
        save: PathBuf,

        moves: String,
    },

    /// Print a saved run's map and position
    Show {
        #[arg(long)]
        save: PathBuf,
    },

    /// List runs in the default save directory
    Saves,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Command::Generate {
            seed,
            config,
            save,
            name,
        } => {
            let config = load_config(config.as_deref())?;
            let mut rng = seed.map(GameRng::new).unwrap_or_else(GameRng::from_entropy);
            let run = Run::generate(&config, &mut rng).context("map generation failed")?;
            print_map(&run);

            let target = save.or_else(|| name.as_deref().map(default_save_path));
            if let Some(path) = target {
                save_run(&run, &path)?;
                println!("Saved to {}", path.display());
            }
        }
        Command::Walk { save, moves } => {
            let mut run =
                load_run(&save).with_context(|| format!("loading {}", save.display()))?;
            for direction in parse_moves(&moves)? {
                match run.step(direction) {
                    MoveOutcome::Stayed => println!("{}: no way further", direction),
                    MoveOutcome::Moved {
                        node,
                        newly_visited,
                    } => println!(
                        "{}: {} room {} ({}){}",
                        direction,
                        node,
                        run.graph[node].room.id,
                        run.graph[node].room.room_type,
                        if newly_visited { " [new]" } else { "" }
                    ),
                }
            }
            print_position(&run);
            save_run(&run, &save)?;
        }
        Command::Show { save } => {
            let run = load_run(&save).with_context(|| format!("loading {}", save.display()))?;
            print_map(&run);
            print_position(&run);
        }
        Command::Saves => {
            for (path, header) in list_saves()? {
                println!(
                    "{}  seed {}  {} nodes  {} moves",
                    path.display(),
                    header
                        .seed
                        .map_or_else(|| "-".to_string(), |s| s.to_string()),
                    header.node_count,
                    header.moves
                );
            }
        }
    }

    Ok(())
}

/// Read map parameters from a JSON file, or use the defaults
fn load_config(path: Option<&Path>) -> Result<MapConfig> {
    let Some(path) = path else {
        return Ok(MapConfig::default());
    };
    let file = File::open(path).with_context(|| format!("opening config {}", path.display()))?;
    let config: MapConfig = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing config {}", path.display()))?;
    info!("loaded map config from {}", path.display());
    Ok(config)
}

/// Parse a move string such as "LRRL"; whitespace is ignored
fn parse_moves(moves: &str) -> Result<Vec<Direction>> {
    let mut directions = Vec::with_capacity(moves.len());
    for c in moves.chars().filter(|c| !c.is_whitespace()) {
        let Some(direction) = Direction::from_char(c) else {
            bail!("invalid move '{c}', use L or R");
        };
        directions.push(direction);
    }
    Ok(directions)
}

/// One line per level, nodes left to right
fn print_map(run: &Run) {
    let mut levels: BTreeMap<u32, Vec<_>> = BTreeMap::new();
    for node in run.graph.nodes() {
        levels.entry(node.level).or_default().push(node);
    }

    for (level, mut nodes) in levels {
        nodes.sort_by(|a, b| a.position.x.total_cmp(&b.position.x));
        let cells: Vec<String> = nodes
            .iter()
            .map(|node| {
                let marker = if node.id == run.current() {
                    "@"
                } else if run.navigator.has_visited(node.id) {
                    "+"
                } else {
                    ""
                };
                let exits: Vec<String> = node.exits.iter().map(|e| e.to_string()).collect();
                format!(
                    "{}{}[{} {}]@{:.1}->{}",
                    marker,
                    node.id,
                    node.room.id,
                    node.room.room_type,
                    node.position.x,
                    exits.join(",")
                )
            })
            .collect();
        println!("L{:<2} {}", level, cells.join("  "));
    }
}

fn print_position(run: &Run) {
    let node = run.current_node();
    println!(
        "At {} room {} ({}), {} moves, {} rooms visited{}",
        node.id,
        node.room.id,
        node.room.room_type,
        run.navigator.path().len(),
        run.navigator.visited().len(),
        if run.is_complete() { ", run complete" } else { "" }
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_moves() {
        assert_eq!(
            parse_moves("Lr l").unwrap(),
            vec![Direction::Left, Direction::Right, Direction::Left]
        );
        let err = parse_moves("LXR").unwrap_err();
        assert_eq!(err.to_string(), "invalid move 'X', use L or R");
        assert!(parse_moves("").unwrap().is_empty());
    }

    #[test]
    fn test_load_config() {
        assert_eq!(load_config(None).unwrap(), MapConfig::default());

        let err = load_config(Some(Path::new("/nonexistent/map.json"))).unwrap_err();
        assert!(err.to_string().starts_with("opening config"));
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from(["dungeon-map", "walk", "--save", "run.json", "LRR"]).unwrap();
        assert!(matches!(args.command, Command::Walk { moves, .. } if moves == "LRR"));

        assert!(
            Args::try_parse_from(["dungeon-map", "generate", "--save", "a.json", "--name", "b"])
                .is_err()
        );
    }
}
