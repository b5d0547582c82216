//! Batch runs of many independent universes over one league.
//!
//! Provides a pure function interface: `(league, seeds, days) -> summary`.
//! Universes share nothing, so callers may run them on as many threads as
//! they like without affecting any single universe's results.

use crate::error::SimResult;
use crate::game::LAST_INNING;
use crate::roster::{LeagueConfig, Roster};
use crate::sim::{DayReport, Sim};
use serde::Serialize;

/// Configuration for a survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurveyConfig {
    /// Days to play in each universe.
    pub days: u64,
    /// Shape of the shared league.
    pub league: LeagueConfig,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            days: 9,
            league: LeagueConfig::default(),
        }
    }
}

/// Aggregated results for one or more universes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SurveySummary {
    /// Universes folded in.
    pub universes: u64,
    /// Days played.
    pub days: u64,
    /// Games completed.
    pub games: u64,
    /// Runs scored by both sides.
    pub runs: u64,
    /// Games won by the home team.
    pub home_wins: u64,
    /// Games that went past regulation.
    pub extra_innings: u64,
    /// Ticks run.
    pub ticks: u64,
}

impl SurveySummary {
    /// Fold in one completed day.
    pub fn add_day(&mut self, report: &DayReport) {
        self.days += 1;
        self.ticks += report.ticks;
        for game in &report.games {
            self.games += 1;
            self.runs += u64::from(game.home_score) + u64::from(game.away_score);
            if game.outcome().0 == game.home_team {
                self.home_wins += 1;
            }
            if game.inning > LAST_INNING {
                self.extra_innings += 1;
            }
        }
    }

    /// Combine two partial summaries.
    pub fn merge(&mut self, other: &Self) {
        self.universes += other.universes;
        self.days += other.days;
        self.games += other.games;
        self.runs += other.runs;
        self.home_wins += other.home_wins;
        self.extra_innings += other.extra_innings;
        self.ticks += other.ticks;
    }

    /// Mean runs per game.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn runs_per_game(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.runs as f64 / self.games as f64
    }

    /// Fraction of games won at home (0.0-1.0).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn home_win_rate(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.home_wins as f64 / self.games as f64
    }

    /// Mean ticks needed to finish a day.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ticks_per_day(&self) -> f64 {
        if self.days == 0 {
            return 0.0;
        }
        self.ticks as f64 / self.days as f64
    }
}

/// Generator seeds for the `index`-th universe of a survey based at `base`.
///
/// Both words come out of a splitmix64 step, so neighbouring indices give
/// unrelated streams and neither word is zero.
#[must_use]
pub fn universe_seeds(base: u64, index: u64) -> (u64, u64) {
    let seed0 = splitmix64(base.wrapping_add(index));
    let seed1 = splitmix64(seed0);
    (seed0 | 1, seed1 | 1)
}

fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Run one universe over `roster` for `days` days and summarize it.
///
/// # Errors
///
/// Returns an error if the roster cannot be scheduled (odd team count).
pub fn survey_universe(roster: &Roster, seeds: (u64, u64), days: u64) -> SimResult<SurveySummary> {
    let mut sim = Sim::new(seeds.0, seeds.1, roster.clone(), 0)?;
    let mut summary = SurveySummary {
        universes: 1,
        ..SurveySummary::default()
    };
    for _ in 0..days {
        summary.add_day(&sim.play_day()?);
    }
    Ok(summary)
}
