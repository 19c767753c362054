#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that generates a labyrinth and prints it.

mod layout;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use labyrinth_core::{Coord, ProximityTier};
use labyrinth_system_backtracking::BacktrackingGenerator;
use labyrinth_system_bearing::{bearing, Bearing};
use labyrinth_system_linking::{
    LinkingConfig, LinkingGenerator, LinkingMode, DEFAULT_LINK_PROBABILITY,
};
use labyrinth_world::{Generator, Grid};
use layout::Markers;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

/// Maze generation strategy selectable from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Strategy {
    /// Probabilistic linking from a seeded start, then forced cleanup.
    Linking,
    /// Every interior face open; only seeds are placed.
    Open,
    /// Depth-first backtracking producing a perfect maze.
    Backtracking,
}

/// Generates a grid labyrinth and prints it as ASCII art.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of columns in the grid.
    #[arg(long, default_value_t = 10)]
    columns: u32,

    /// Number of rows in the grid.
    #[arg(long, default_value_t = 10)]
    rows: u32,

    /// Generation strategy.
    #[arg(long, value_enum, default_value_t = Strategy::Linking)]
    strategy: Strategy,

    /// Chance that the linking strategy opens each tried face.
    #[arg(long, default_value_t = DEFAULT_LINK_PROBABILITY)]
    link_probability: f64,

    /// Seed for the random source; OS entropy when omitted.
    #[arg(long)]
    seed: Option<u64>,
}

/// Finished grid together with the two highlighted cells.
struct Labyrinth {
    grid: Grid,
    markers: Markers,
}

/// Entry point for the labyrinth command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    tracing::info!(
        columns = args.columns,
        rows = args.rows,
        strategy = ?args.strategy,
        seed = ?args.seed,
        "generating labyrinth"
    );

    let labyrinth = build(&args, rng)?;
    let rendered = layout::render(&labyrinth.grid, labyrinth.markers)
        .context("failed to render the labyrinth")?;
    print!("{rendered}");

    let hint = bearing(labyrinth.markers.start, labyrinth.markers.target)
        .context("failed to resolve the bearing toward the target")?;
    println!("{}", describe(hint));
    Ok(())
}

fn build(args: &Args, rng: ChaCha8Rng) -> Result<Labyrinth> {
    match args.strategy {
        Strategy::Linking | Strategy::Open => {
            let mode = if args.strategy == Strategy::Open {
                LinkingMode::Open
            } else {
                LinkingMode::Walled
            };
            let config = LinkingConfig::new(args.link_probability)?;
            let mut generator = LinkingGenerator::new(args.columns, args.rows, mode, config, rng)?;
            generator.generate().context("linking generation failed")?;

            let seeds = generator
                .seeds()
                .context("linking generator finished without seeds")?;
            let stats = generator.stats();
            tracing::info!(
                reached_by_linking = stats.reached_by_linking,
                cleanup_passes = stats.cleanup_passes,
                passages = stats.passages,
                "linking finished"
            );
            Ok(Labyrinth {
                grid: generator.into_grid()?,
                markers: Markers {
                    start: seeds.start,
                    target: seeds.target,
                },
            })
        }
        Strategy::Backtracking => {
            let mut generator = BacktrackingGenerator::new(args.columns, args.rows, rng)?;
            generator
                .generate()
                .context("backtracking generation failed")?;

            let start = generator
                .start()
                .context("backtracking generator finished without a start cell")?;
            tracing::info!(passages = generator.passages(), %start, "backtracking finished");
            let grid = generator.into_grid()?;
            let target = mirror(&grid, start);
            Ok(Labyrinth {
                grid,
                markers: Markers { start, target },
            })
        }
    }
}

/// Reflects a cell through the centre of the grid.
fn mirror(grid: &Grid, coord: Coord) -> Coord {
    let columns = i32::try_from(grid.columns()).unwrap_or(i32::MAX);
    let rows = i32::try_from(grid.rows()).unwrap_or(i32::MAX);
    Coord::new(columns - 1 - coord.x(), rows - 1 - coord.y())
}

fn describe(hint: Bearing) -> String {
    match hint {
        Bearing::Coincident => "The target shares the start cell.".to_owned(),
        Bearing::Toward { distance, point } => {
            let tier = match ProximityTier::classify(distance) {
                ProximityTier::Near => "near",
                ProximityTier::Medium => "a fair way off",
                ProximityTier::Far => "far",
                ProximityTier::Distant => "very distant",
            };
            format!(
                "The target is {tier}, toward the {} ({distance:.1} cells).",
                point.label()
            )
        }
    }
}
