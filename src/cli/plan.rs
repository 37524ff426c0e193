//! Plan command implementation.

use super::output::format_plan;
use super::{CliError, MapOptions, OutputFormat};
use frontier::Campaign;
use frontier::arena::generate_grid;
use std::time::Instant;

/// Execute the plan command.
///
/// # Errors
///
/// Returns an error if the map cannot be generated or planning fails.
pub(crate) fn execute(map: &MapOptions, format: OutputFormat) -> Result<(), CliError> {
    let started = Instant::now();
    let seed = map.seed();
    let config = map.arena_config()?;
    let grid = generate_grid(seed, config.width, config.height, config.players)?;

    let campaign = Campaign::plan(&grid, 1, &config.planner, started)?;
    let report = campaign.report();

    match format {
        OutputFormat::Text => {
            println!("Seed: {seed}");
            print!("{}", format_plan(report));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report)?;
            println!("{json}");
        }
    }

    Ok(())
}
