//! Run command implementation.

use super::output::format_text;
use super::{CliError, MapOptions, OutputFormat};
use frontier::arena::run_game;

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the config is invalid or the game fails to start.
pub(crate) fn execute(map: &MapOptions, turns: u32, format: OutputFormat) -> Result<(), CliError> {
    let seed = map.seed();
    let mut config = map.arena_config()?;
    config.max_turns = turns;

    tracing::info!(seed, players = config.players, "running game");
    let result = run_game(seed, &config)?;

    match format {
        OutputFormat::Text => {
            print!("{}", format_text(&result));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result)?;
            println!("{json}");
        }
    }

    Ok(())
}
