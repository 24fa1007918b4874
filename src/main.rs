//! Jigsaw Tile Solver
//!
//! Reassembles an image from rotated and flipped square tiles, prints the
//! product of the corner tile ids, and measures how much of the image is left
//! over after marking every sea monster.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use jigsaw::grid::format_placement;
use jigsaw::{assembly, input, monster};
use jigsaw::{
    NeighbourhoodIndex, Pattern, Placement, Pruning, Puzzle, SolverConfig, TransformationGroup,
};

/// Solves tile jigsaw puzzles and searches the result for sea monsters.
#[derive(Parser)]
#[command(name = "jigsaw")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// How candidate tiles are restricted during the search.
    #[arg(long, value_enum, default_value_t = PruningArg::Fallback, global = true)]
    pruning: PruningArg,

    /// Pattern file to search for instead of the sea monster (`#` marks a cell).
    #[arg(long, global = true)]
    pattern: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the corner product and the water roughness.
    Solve { input: PathBuf },
    /// Print the product of the four corner tile ids.
    Corners { input: PathBuf },
    /// List every tile's neighbour degree.
    Degrees { input: PathBuf },
    /// Print the assembled image with pattern cells marked as `O`.
    Image { input: PathBuf },
}

#[derive(Clone, Copy, ValueEnum)]
enum PruningArg {
    /// Every unused tile is a candidate everywhere.
    None,
    /// Only tiles whose degree matches the cell (corner, border, interior).
    Degree,
    /// Degree buckets, then an unrestricted search if they fail.
    Fallback,
}

impl From<PruningArg> for Pruning {
    fn from(arg: PruningArg) -> Self {
        match arg {
            PruningArg::None => Pruning::None,
            PruningArg::Degree => Pruning::DegreeBuckets,
            PruningArg::Fallback => Pruning::WithFallback,
        }
    }
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            println!("no solution found");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Runs one subcommand; `Ok(false)` means the tiles could not be placed.
fn run(cli: &Cli) -> Result<bool> {
    let config = SolverConfig {
        pruning: cli.pruning.into(),
    };
    let group = TransformationGroup::new();

    match &cli.command {
        Command::Solve { input } => {
            let puzzle = load_puzzle(input)?;
            let pattern = load_pattern(cli.pattern.as_deref())?;
            let Some(placement) = solve(&puzzle, &group, &config) else {
                return Ok(false);
            };
            let image = assembly::assemble(&puzzle, &placement, &group);
            let report = monster::detect(&image, &pattern, &group);
            println!("{}", placement.corner_product());
            println!("{}", report.roughness);
        }
        Command::Corners { input } => {
            let puzzle = load_puzzle(input)?;
            let Some(placement) = solve(&puzzle, &group, &config) else {
                return Ok(false);
            };
            println!("{}", placement.corner_product());
        }
        Command::Degrees { input } => {
            let puzzle = load_puzzle(input)?;
            let index = NeighbourhoodIndex::build(&puzzle, &group);
            print!("{}", format_degrees(&index));
        }
        Command::Image { input } => {
            let puzzle = load_puzzle(input)?;
            let pattern = load_pattern(cli.pattern.as_deref())?;
            let Some(placement) = solve(&puzzle, &group, &config) else {
                return Ok(false);
            };
            print!("{}", format_placement(&placement));
            println!();
            let image = assembly::assemble(&puzzle, &placement, &group);
            let report = monster::detect(&image, &pattern, &group);
            println!("{}", report.render(&image, &group));
            println!();
            println!(
                "{} matches in orientation {}, roughness {}",
                report.matches, report.transform, report.roughness
            );
        }
    }
    Ok(true)
}

fn load_puzzle(path: &Path) -> Result<Puzzle> {
    input::load(path)
        .with_context(|| format!("loading puzzle from {}", path.display()))
}

fn load_pattern(path: Option<&Path>) -> Result<Pattern> {
    let Some(path) = path else {
        return Ok(Pattern::sea_monster());
    };
    input::load_pattern(path)
        .with_context(|| format!("loading pattern from {}", path.display()))
}

fn solve(puzzle: &Puzzle, group: &TransformationGroup, config: &SolverConfig) -> Option<Placement> {
    let (placement, stats) = puzzle.solve(group, config);
    tracing::info!(
        placements = stats.placements_tried,
        backtracks = stats.backtracks,
        fallback = stats.fallback_used,
        "search finished"
    );
    placement
}

/// One `id degree` line per tile, lowest degree first.
fn format_degrees(index: &NeighbourhoodIndex) -> String {
    index
        .degrees()
        .iter()
        .map(|(id, degree)| format!("{id} {degree}\n"))
        .collect()
}
