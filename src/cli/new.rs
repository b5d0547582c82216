//! New command implementation.

use super::{CliError, clock_seed};
use blasebox::roster::{LeagueConfig, generate_league};
use blasebox::sim::now_ms;
use blasebox::{Origin, Player, Roster, Sim, Team, Universe};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Roster file layout.
#[derive(Debug, Deserialize)]
struct RosterFile {
    players: Vec<Player>,
    teams: Vec<Team>,
}

/// Options for the new command.
#[derive(Debug)]
pub(crate) struct NewOptions {
    /// Universe file to write.
    pub(crate) out: PathBuf,
    /// Roster file, if not generating.
    pub(crate) roster: Option<PathBuf>,
    /// Generated league size.
    pub(crate) teams: Option<usize>,
    /// Seed for generated names.
    pub(crate) league_seed: u64,
    /// First generator seed.
    pub(crate) seed0: Option<u64>,
    /// Second generator seed.
    pub(crate) seed1: Option<u64>,
    /// Start time, epoch ms.
    pub(crate) start: Option<i64>,
    /// Branch point.
    pub(crate) origin: Origin,
}

/// Execute the new command.
///
/// # Errors
///
/// Returns an error if the roster cannot be read or validated, or the
/// universe file cannot be written.
pub(crate) fn execute(options: &NewOptions) -> Result<(), CliError> {
    let roster = match &options.roster {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|e| {
                CliError::new(format!("Failed to read {}: {e}", path.display()))
            })?;
            let file: RosterFile = serde_json::from_str(&text)?;
            Roster::new(file.players, file.teams)?
        }
        None => {
            let config = LeagueConfig {
                teams: options.teams.unwrap_or(LeagueConfig::default().teams),
                ..LeagueConfig::default()
            };
            generate_league(options.league_seed, &config)?
        }
    };

    let seed0 = options.seed0.unwrap_or_else(clock_seed);
    let seed1 = options.seed1.unwrap_or_else(|| clock_seed().rotate_left(29) | 1);
    let start = options.start.unwrap_or_else(now_ms);

    let sim = Sim::new(seed0, seed1, roster, start)?;
    let universe = Universe::new(options.origin, sim);
    universe.save(&options.out)?;

    println!(
        "Created {} ({} teams, seeds {seed0}/{seed1})",
        options.out.display(),
        universe.sim.roster().team_count()
    );

    Ok(())
}
