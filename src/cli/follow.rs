//! Follow command implementation.
//!
//! Pulls the universe up to the wall clock, prints every play that changed,
//! checkpoints through a throttled file store, then sleeps until the next
//! tick is due.

use super::CliError;
use super::output::format_play;
use blasebox::Universe;
use blasebox::sim::now_ms;
use blasebox::snapshot::{CheckpointOutcome, FileStore, Throttled};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing::debug;

/// Latest play text per game, tagged with the day it belongs to.
fn plays(universe: &Universe) -> (u64, Vec<String>) {
    let state = universe.sim.state();
    (
        state.day,
        state.games.iter().map(|g| g.last_update.clone()).collect(),
    )
}

/// Print the plays that differ from `before`.
fn print_changes(universe: &Universe, before: &(u64, Vec<String>)) {
    let state = universe.sim.state();
    let same_day = state.day == before.0;
    if !same_day {
        println!("-- day {} complete --", before.0 + 1);
    }
    for (i, game) in state.games.iter().enumerate() {
        let changed = !same_day || before.1.get(i) != Some(&game.last_update);
        if changed && !game.last_update.is_empty() {
            println!("{}", format_play(universe.sim.roster(), state.day, game));
        }
    }
}

/// Execute the follow command.
///
/// # Errors
///
/// Returns an error if the universe cannot be loaded, advanced, or
/// checkpointed.
pub(crate) fn execute(
    path: &Path,
    store: Option<PathBuf>,
    checkpoint_secs: u64,
    max_ticks: Option<u64>,
) -> Result<(), CliError> {
    let mut universe = Universe::load(path)?;

    let id = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| CliError::new(format!("no file name in {}", path.display())))?;
    let dir = store.unwrap_or_else(|| path.parent().map(Path::to_path_buf).unwrap_or_default());
    let interval_ms = i64::try_from(checkpoint_secs.saturating_mul(1_000)).unwrap_or(i64::MAX);
    let mut store = Throttled::new(FileStore::new(dir)?, interval_ms);

    let mut remaining = max_ticks.unwrap_or(u64::MAX);
    while remaining > 0 {
        let before = plays(&universe);

        let now = now_ms();
        let cap = i64::try_from(remaining)
            .ok()
            .and_then(|n| n.checked_mul(blasebox::TICK_MS))
            .and_then(|span| universe.sim.state().time.checked_add(span))
            .unwrap_or(i64::MAX);
        let ran = universe.sim.run_to_time(now.min(cap))?;
        remaining = remaining.saturating_sub(ran);

        if ran > 0 {
            print_changes(&universe, &before);
            if let CheckpointOutcome::Skipped { since_last_ms } =
                store.checkpoint(&id, &universe.to_raw(), now)?
            {
                debug!(since_last_ms, "waiting to checkpoint");
            }
        }

        if remaining == 0 {
            break;
        }
        let wait = universe.sim.next_tick_time() - now_ms();
        if let Ok(ms) = u64::try_from(wait) {
            thread::sleep(Duration::from_millis(ms));
        }
    }

    universe.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use blasebox::roster::{LeagueConfig, generate_league};
    use blasebox::{Origin, Sim};

    #[test]
    fn test_follow_catches_up_and_checkpoints() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alpha.json");
        let config = LeagueConfig {
            teams: 2,
            ..LeagueConfig::default()
        };
        let sim = Sim::new(8, 9, generate_league(0, &config).unwrap(), 0).unwrap();
        Universe::new(Origin::default(), sim).save(&path).unwrap();

        let store = dir.path().join("checkpoints");
        execute(&path, Some(store.clone()), 60, Some(5)).unwrap();

        assert_eq!(Universe::load(&path).unwrap().sim.state().tick, 5);
        let checkpoint = Universe::load(&store.join("alpha.json")).unwrap();
        assert_eq!(checkpoint.sim.state().tick, 5);
    }
}
