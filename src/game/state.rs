//! Per-game state.

use crate::error::SimResult;
use crate::roster::{Player, Roster};
use serde::{Deserialize, Serialize};

/// Step of a game's state machine.
///
/// The phase names the *next* thing that happens when the game is ticked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Fresh matchup; scores are zeroed on the first tick.
    NotStarted,
    /// Reset inning and batting order to their sentinels.
    StartGame,
    /// Flip the half inning.
    StartHalfInning,
    /// Bring up the next batter for the batting side.
    BatterUp,
    /// Throw one pitch.
    Pitch,
    /// Terminal.
    GameOver,
}

/// A runner on base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Runner {
    /// Display name of the runner.
    pub name: String,
    /// Base occupied: 1, 2 or 3. A value of 4 or more means the runner
    /// crossed the plate and is removed within the same tick.
    pub base: u8,
}

impl Runner {
    /// Create a runner on the given base.
    #[must_use]
    pub fn new(name: impl Into<String>, base: u8) -> Self {
        Self {
            name: name.into(),
            base,
        }
    }
}

/// Complete state of one matchup.
///
/// Runners are ordered lead runner first, so bases strictly decrease along
/// the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Next step of the state machine.
    pub phase: GamePhase,
    /// Home team id.
    pub home_team: String,
    /// Away team id.
    pub away_team: String,
    /// Runs for the home team.
    pub home_score: u32,
    /// Runs for the away team.
    pub away_score: u32,
    /// Zero-based inning; -1 before the first half inning starts.
    pub inning: i32,
    /// True while the away team bats.
    pub top: bool,
    /// Monotonic batting-order position for the home team.
    pub home_batter_index: i64,
    /// Monotonic batting-order position for the away team.
    pub away_batter_index: i64,
    /// Balls in the current count.
    pub balls: u8,
    /// Strikes in the current count.
    pub strikes: u8,
    /// Outs in the current half inning.
    pub outs: u8,
    /// Runners on base, lead runner first.
    pub runners: Vec<Runner>,
    /// Latest play-by-play line.
    pub last_update: String,
}

impl GameState {
    /// A fresh, unplayed game between two teams.
    #[must_use]
    pub fn new(home_team: impl Into<String>, away_team: impl Into<String>) -> Self {
        Self {
            phase: GamePhase::NotStarted,
            home_team: home_team.into(),
            away_team: away_team.into(),
            home_score: 0,
            away_score: 0,
            inning: -1,
            top: false,
            home_batter_index: -1,
            away_batter_index: -1,
            balls: 0,
            strikes: 0,
            outs: 0,
            runners: Vec::new(),
            last_update: String::new(),
        }
    }

    /// A fresh game with the same home/away assignment.
    #[must_use]
    pub fn rematch(&self) -> Self {
        Self::new(self.home_team.clone(), self.away_team.clone())
    }

    /// Whether the game has reached its terminal phase.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Id of the team currently at bat.
    #[must_use]
    pub fn batting_team(&self) -> &str {
        if self.top { &self.away_team } else { &self.home_team }
    }

    /// Id of the team currently in the field.
    #[must_use]
    pub fn fielding_team(&self) -> &str {
        if self.top { &self.home_team } else { &self.away_team }
    }

    /// Winner and loser ids, judged on the current score.
    ///
    /// Only the home team wins by scoring strictly more; a tie is credited
    /// to the away team.
    #[must_use]
    pub fn outcome(&self) -> (&str, &str) {
        if self.home_score > self.away_score {
            (&self.home_team, &self.away_team)
        } else {
            (&self.away_team, &self.home_team)
        }
    }

    /// Starting pitchers for `day`, as (home, away).
    ///
    /// # Errors
    ///
    /// Returns an error if either team or pitcher is missing from the roster.
    pub fn pitchers<'r>(&self, roster: &'r Roster, day: u64) -> SimResult<(&'r Player, &'r Player)> {
        let home = roster.team(&self.home_team)?;
        let away = roster.team(&self.away_team)?;
        Ok((
            roster.player(home.pitcher_id(day))?,
            roster.player(away.pitcher_id(day))?,
        ))
    }

    /// Add runs to the side currently at bat.
    pub(crate) fn credit_runs(&mut self, runs: u32) {
        if self.top {
            self.away_score = self.away_score.saturating_add(runs);
        } else {
            self.home_score = self.home_score.saturating_add(runs);
        }
    }

    pub(crate) fn reset_count(&mut self) {
        self.balls = 0;
        self.strikes = 0;
    }
}
