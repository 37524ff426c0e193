//! Tournament command implementation.

// Games per second
#![allow(clippy::cast_precision_loss)]

use super::output::{
    JsonTournamentResult, TournamentStats, format_tournament_csv, format_tournament_text,
};
use super::{CliError, MapOptions, TournamentFormat};
use frontier::arena::{generate_grid, run_game};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::time::Instant;

/// Execute the tournament command.
///
/// # Errors
///
/// Returns an error if the config is invalid or the map options are unusable.
pub(crate) fn execute(
    map: &MapOptions,
    games: u64,
    threads: Option<usize>,
    max_turns: Option<u32>,
    format: TournamentFormat,
    progress: bool,
) -> Result<(), CliError> {
    let mut config = map.arena_config()?;
    if let Some(turns) = max_turns {
        config.max_turns = turns;
    }
    let base_seed = map.seed();

    // Fail fast on map options instead of once per game
    generate_grid(base_seed, config.width, config.height, config.players)?;
    config.planner.validate()?;

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(num_threads) = threads {
        builder = builder.num_threads(num_threads);
    }
    let pool = builder
        .build()
        .map_err(|e| CliError::new(format!("Failed to start worker threads: {e}")))?;

    let bar = if progress {
        let bar = ProgressBar::new(games);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} {elapsed_precise} [{bar:40.green/white}] {pos}/{len} games, eta {eta}")
            .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
            .progress_chars("=>-");
        bar.set_style(style);
        Some(bar)
    } else {
        None
    };

    let timer = Instant::now();
    let num_players = usize::from(config.players);

    // Each worker folds games into its own stats; the partial stats are merged at the end
    let stats = pool.install(|| {
        (0..games)
            .into_par_iter()
            .fold(
                || TournamentStats::new(num_players),
                |mut partial, game| {
                    let seed = base_seed.wrapping_add(game);
                    match run_game(seed, &config) {
                        Ok(result) => partial.add_result(&result),
                        Err(e) => {
                            tracing::warn!(seed, "game failed: {e}");
                            partial.failures += 1;
                        }
                    }
                    if let Some(bar) = &bar {
                        bar.inc(1);
                    }
                    partial
                },
            )
            .reduce(
                || TournamentStats::new(num_players),
                |mut a, b| {
                    a.merge(&b);
                    a
                },
            )
    });

    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    let elapsed = timer.elapsed().as_secs_f64();
    let rate = if elapsed > 0.0 {
        stats.games_played as f64 / elapsed
    } else {
        0.0
    };

    match format {
        TournamentFormat::Text => {
            println!();
            print!("{}", format_tournament_text(&stats));
            println!();
            println!("Elapsed: {elapsed:.2}s ({rate:.1} games/sec)");
        }
        TournamentFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonTournamentResult::from_stats(&stats))?;
            println!("{json}");
        }
        TournamentFormat::Csv => {
            print!("{}", format_tournament_csv(&stats));
        }
    }

    Ok(())
}
