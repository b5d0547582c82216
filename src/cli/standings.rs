//! Standings command implementation.

use super::output::{format_standings, standings};
use super::{CliError, OutputFormat};
use blasebox::Universe;
use std::path::Path;

/// Execute the standings command.
///
/// # Errors
///
/// Returns an error if the universe cannot be loaded.
pub(crate) fn execute(path: &Path, format: OutputFormat) -> Result<(), CliError> {
    let universe = Universe::load(path)?;

    match format {
        OutputFormat::Text => print!("{}", format_standings(&universe)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&standings(&universe))?;
            println!("{json}");
        }
    }

    Ok(())
}
