//! The orchestrator that advances every game of a universe in lockstep.
//!
//! A [`Sim`] owns the RNG, the roster, and the day's games. Callers pull it
//! forward with [`Sim::run_to_time`]; there is no internal timer. Each tick
//! gives every live game exactly one transition, in list order, from the one
//! shared generator, so the order of `games` is part of the determinism
//! contract.

mod records;

pub use records::{Record, RecordBook};

use crate::error::{SimError, SimResult};
use crate::game::{self, GameState};
use crate::rng::Rng;
use crate::roster::Roster;
use crate::schedule;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

/// Simulated milliseconds per tick.
pub const TICK_MS: i64 = 5_000;

/// Everything about a universe that changes as it runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimState {
    /// Days completed.
    pub day: u64,
    /// Today's games, in tick order.
    pub games: Vec<GameState>,
    /// Lifetime win/loss records.
    pub records: RecordBook,
    /// Ticks run so far.
    pub tick: u64,
    /// Simulated time, epoch milliseconds; always a multiple of [`TICK_MS`]
    /// for universes started by [`Sim::new`].
    pub time: i64,
}

/// Final games of one completed day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayReport {
    /// The day that completed.
    pub day: u64,
    /// Its games, in tick order, all in their terminal phase.
    pub games: Vec<GameState>,
    /// Ticks it took to finish from where it was picked up.
    pub ticks: u64,
}

/// A running universe.
#[derive(Debug, Clone, PartialEq)]
pub struct Sim {
    rng: Rng,
    roster: Roster,
    state: SimState,
}

impl Sim {
    /// Start a universe at `now_ms`, floored to a tick boundary.
    ///
    /// Draws the day-0 matchups immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if both seeds are zero or the roster has an odd
    /// number of teams.
    pub fn new(seed0: u64, seed1: u64, roster: Roster, now_ms: i64) -> SimResult<Self> {
        if seed0 == 0 && seed1 == 0 {
            return Err(SimError::ZeroSeed);
        }
        let mut rng = Rng::new(seed0, seed1);
        let games = schedule::new_matchups(&mut rng, &roster)?;
        let records = RecordBook::zeroed(roster.team_ids());
        let state = SimState {
            day: 0,
            games,
            records,
            tick: 0,
            time: now_ms.div_euclid(TICK_MS) * TICK_MS,
        };
        info!(teams = roster.team_count(), seed0, seed1, "universe created");
        Ok(Self { rng, roster, state })
    }

    /// Start a universe at the current wall-clock time.
    ///
    /// This is the only place the simulation reads the system clock.
    ///
    /// # Errors
    ///
    /// Same as [`Sim::new`].
    pub fn starting_now(seed0: u64, seed1: u64, roster: Roster) -> SimResult<Self> {
        Self::new(seed0, seed1, roster, now_ms())
    }

    /// Reassemble a universe from its parts without any validation.
    pub(crate) fn from_parts(rng: Rng, roster: Roster, state: SimState) -> Self {
        Self { rng, roster, state }
    }

    /// Tick until simulated time reaches `goal_ms`. Returns the ticks run.
    ///
    /// Calling with the wall-clock time catches up any backlog in one call.
    ///
    /// # Errors
    ///
    /// Returns an error if a game references a team or player missing from
    /// the roster. State may be partially advanced when that happens.
    pub fn run_to_time(&mut self, goal_ms: i64) -> SimResult<u64> {
        let mut ticks = 0;
        while self.state.time < goal_ms {
            self.step()?;
            ticks += 1;
        }
        debug!(ticks, day = self.state.day, "ran tick(s)");
        Ok(ticks)
    }

    /// Tick until `day` days have been completed. Returns the ticks run.
    ///
    /// # Errors
    ///
    /// Same as [`Sim::run_to_time`].
    pub fn run_until_day(&mut self, day: u64) -> SimResult<u64> {
        let mut ticks = 0;
        while self.state.day < day {
            ticks += self.play_day()?.ticks;
        }
        Ok(ticks)
    }

    /// Tick until the current day completes and return its final games.
    ///
    /// Simulated time advances exactly as it would under
    /// [`Sim::run_to_time`].
    ///
    /// # Errors
    ///
    /// Same as [`Sim::run_to_time`].
    pub fn play_day(&mut self) -> SimResult<DayReport> {
        let day = self.state.day;
        let mut ticks = 0;
        loop {
            let finished = self.step()?;
            ticks += 1;
            if let Some(games) = finished {
                return Ok(DayReport { day, games, ticks });
            }
        }
    }

    /// Simulated time after one more tick.
    #[must_use]
    pub fn next_tick_time(&self) -> i64 {
        self.state.time.saturating_add(TICK_MS)
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &SimState {
        &self.state
    }

    /// The roster this universe was built from.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Current generator state.
    #[must_use]
    pub fn rng(&self) -> &Rng {
        &self.rng
    }

    /// One tick. Returns the day's final games if this tick completed it.
    fn step(&mut self) -> SimResult<Option<Vec<GameState>>> {
        let finished = self.tick_games()?;
        self.state.tick = self.state.tick.saturating_add(1);
        self.state.time = self.state.time.saturating_add(TICK_MS);
        Ok(finished)
    }

    fn tick_games(&mut self) -> SimResult<Option<Vec<GameState>>> {
        let mut any_running = false;
        for live in &mut self.state.games {
            game::tick(&mut self.rng, &self.roster, live)?;
            debug_assert!(
                game::check_invariants(live).is_empty(),
                "{:?}",
                game::check_invariants(live)
            );
            if !live.is_over() {
                any_running = true;
            }
        }

        if any_running {
            return Ok(None);
        }
        self.finish_day().map(Some)
    }

    fn finish_day(&mut self) -> SimResult<Vec<GameState>> {
        for game in &self.state.games {
            let (winner, loser) = game.outcome();
            self.state.records.record_game(winner, loser);
        }
        self.state.day = self.state.day.saturating_add(1);
        info!(day = self.state.day, games = self.state.games.len(), "day complete");

        let next = if schedule::is_series_start(self.state.day) {
            info!(day = self.state.day, "drawing new series");
            schedule::new_matchups(&mut self.rng, &self.roster)?
        } else {
            schedule::rematches(&self.state.games)
        };
        Ok(std::mem::replace(&mut self.state.games, next))
    }
}

/// Wall-clock time in epoch milliseconds.
#[must_use]
pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GamePhase;
    use crate::roster::{LeagueConfig, generate_league};

    fn league(teams: usize) -> Roster {
        let config = LeagueConfig {
            teams,
            ..LeagueConfig::default()
        };
        generate_league(11, &config).unwrap()
    }

    #[test]
    fn test_start_time_snaps_to_tick() {
        let sim = Sim::new(1, 2, league(4), 1_700_000_003_217).unwrap();
        assert_eq!(sim.state().time, 1_700_000_000_000);
        assert_eq!(sim.next_tick_time(), 1_700_000_005_000);
        assert_eq!(sim.state().games.len(), 2);
        assert_eq!(sim.state().day, 0);
    }

    #[test]
    fn test_odd_league_fails_construction() {
        assert!(Sim::new(1, 2, league(3), 0).is_err());
    }

    #[test]
    fn test_zero_seeds_are_rejected() {
        assert_eq!(Sim::new(0, 0, league(4), 0).unwrap_err(), SimError::ZeroSeed);
        // One nonzero word is enough to keep the generator moving.
        assert!(Sim::new(0, 1, league(4), 0).is_ok());
        assert!(Sim::new(1, 0, league(4), 0).is_ok());
    }

    #[test]
    fn test_run_to_time_counts_ticks() {
        let mut sim = Sim::new(1, 2, league(4), 0).unwrap();
        assert_eq!(sim.run_to_time(0).unwrap(), 0);
        assert_eq!(sim.run_to_time(1).unwrap(), 1);
        assert_eq!(sim.run_to_time(TICK_MS * 10).unwrap(), 9);
        assert_eq!(sim.state().tick, 10);
        assert_eq!(sim.state().time, TICK_MS * 10);
        // Already caught up.
        assert_eq!(sim.run_to_time(TICK_MS * 10).unwrap(), 0);
    }

    #[test]
    fn test_day_advances_whole() {
        let mut sim = Sim::new(3, 4, league(6), 0).unwrap();
        sim.run_until_day(1).unwrap();
        assert_eq!(sim.state().day, 1);
        // Every team got exactly one decision for the day.
        for (_, record) in sim.state().records.iter() {
            assert_eq!(record.wins + record.losses, 1);
        }
        // The new day's games are fresh.
        assert!(sim.state().games.iter().all(|g| g.phase == GamePhase::NotStarted));
    }

    #[test]
    fn test_series_reuses_pairings() {
        let mut sim = Sim::new(5, 6, league(8), 0).unwrap();
        let pairing = |sim: &Sim| -> Vec<(String, String)> {
            sim.state()
                .games
                .iter()
                .map(|g| (g.home_team.clone(), g.away_team.clone()))
                .collect()
        };
        let day0 = pairing(&sim);
        sim.run_until_day(1).unwrap();
        assert_eq!(pairing(&sim), day0);
        sim.run_until_day(2).unwrap();
        assert_eq!(pairing(&sim), day0);
    }

    #[test]
    fn test_play_day_reports_finals() {
        let mut sim = Sim::new(9, 10, league(4), 0).unwrap();
        let before = sim.state().games.clone();
        let report = sim.play_day().unwrap();
        assert_eq!(report.day, 0);
        assert_eq!(report.ticks, sim.state().tick);
        assert_eq!(sim.state().time, TICK_MS * i64::try_from(report.ticks).unwrap());
        for (done, fresh) in report.games.iter().zip(&before) {
            assert!(done.is_over());
            assert_ne!(done.home_score, done.away_score);
            assert_eq!(done.home_team, fresh.home_team);
            let (winner, _) = done.outcome();
            assert_eq!(sim.state().records.get(winner).wins, 1);
        }
    }

    #[test]
    fn test_records_accumulate() {
        let mut sim = Sim::new(7, 8, league(4), 0).unwrap();
        sim.run_until_day(4).unwrap();
        assert_eq!(sim.state().records.decisions(), 4 * 4);
    }
}
