//! Run command implementation.

use super::output::{JsonScoreboard, format_scoreboard};
use super::{CliError, OutputFormat};
use blasebox::sim::now_ms;
use blasebox::{TICK_MS, Universe};
use std::path::Path;

/// Simulated time `ticks` ticks after `time`.
fn time_after_ticks(time: i64, ticks: u64) -> Result<i64, CliError> {
    i64::try_from(ticks)
        .ok()
        .and_then(|t| t.checked_mul(TICK_MS))
        .and_then(|span| time.checked_add(span))
        .ok_or_else(|| CliError::new(format!("{ticks} ticks is out of range")))
}

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the universe cannot be loaded, advanced, or saved.
pub(crate) fn execute(
    path: &Path,
    until: Option<i64>,
    ticks: Option<u64>,
    format: OutputFormat,
    quiet: bool,
) -> Result<(), CliError> {
    let mut universe = Universe::load(path)?;

    let goal = match (until, ticks) {
        (_, Some(n)) => time_after_ticks(universe.sim.state().time, n)?,
        (Some(t), None) => t,
        (None, None) => now_ms(),
    };

    let ran = universe.sim.run_to_time(goal)?;
    universe.save(path)?;

    if quiet {
        return Ok(());
    }

    match format {
        OutputFormat::Text => {
            println!("Ran {ran} tick(s)");
            print!("{}", format_scoreboard(&universe));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonScoreboard::from_universe(&universe))?;
            println!("{json}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use blasebox::roster::{LeagueConfig, generate_league};
    use blasebox::{Origin, Sim};

    #[test]
    fn test_ticks_are_relative_to_the_universe() {
        assert_eq!(time_after_ticks(1_000, 3).unwrap(), 1_000 + 3 * TICK_MS);
        assert!(time_after_ticks(i64::MAX, 1).is_err());
    }

    #[test]
    fn test_run_saves_progress() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("u.json");
        let config = LeagueConfig {
            teams: 2,
            ..LeagueConfig::default()
        };
        let sim = Sim::new(4, 5, generate_league(0, &config).unwrap(), 0).unwrap();
        Universe::new(Origin::default(), sim).save(&path).unwrap();

        execute(&path, None, Some(7), OutputFormat::Json, true).unwrap();
        let universe = Universe::load(&path).unwrap();
        assert_eq!(universe.sim.state().tick, 7);
        assert_eq!(universe.sim.state().time, 7 * TICK_MS);
    }
}
