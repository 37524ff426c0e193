//! Frontier CLI - run local games and inspect campaign plans.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Frontier - a simulation-driven expansion planner
#[derive(Parser, Debug)]
#[command(name = "frontier")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Map options shared by every command
#[derive(clap::Args, Debug, Clone)]
struct MapArgs {
    /// Random seed (default: random)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Map width in cells
    #[arg(long, default_value = "30")]
    width: u16,

    /// Map height in cells
    #[arg(long, default_value = "30")]
    height: u16,

    /// Number of players (2-6)
    #[arg(short, long, default_value = "2")]
    players: u8,

    /// Planner config file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a single local game between planner bots
    Run {
        #[command(flatten)]
        map: MapArgs,

        /// Maximum turns (default: 300)
        #[arg(short, long, default_value = "300")]
        turns: u32,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Plan a campaign for player 1 and print the search report
    Plan {
        #[command(flatten)]
        map: MapArgs,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Run many games in parallel and aggregate statistics
    Tournament {
        #[command(flatten)]
        map: MapArgs,

        /// Number of games to run
        #[arg(short, long, default_value = "100")]
        games: u64,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Maximum turns per game (default: 300)
        #[arg(short = 't', long)]
        max_turns: Option<u32>,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::TournamentFormat,

        /// Show progress bar
        #[arg(long)]
        progress: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Logs go to stderr; stdout carries command output
    let filter = EnvFilter::try_from_env("FRONTIER_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("frontier=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match args.command {
        Commands::Run { map, turns, format } => cli::run::execute(&map.into(), turns, format),

        Commands::Plan { map, format } => cli::plan::execute(&map.into(), format),

        Commands::Tournament {
            map,
            games,
            threads,
            max_turns,
            format,
            progress,
        } => cli::tournament::execute(&map.into(), games, threads, max_turns, format, progress),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

impl From<MapArgs> for cli::MapOptions {
    fn from(args: MapArgs) -> Self {
        Self {
            seed: args.seed,
            width: args.width,
            height: args.height,
            players: args.players,
            config: args.config,
        }
    }
}
