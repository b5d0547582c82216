//! The one-ply game state machine.
//!
//! Every call to [`tick`] performs exactly one phase transition. Random
//! draws happen in a fixed order; that order is part of the determinism
//! contract between a universe and its snapshots, so branches below must
//! not be reordered.

use crate::error::SimResult;
use crate::game::bases::{self, GROUND_OUT_ADVANCE, base_name};
use crate::game::{GamePhase, GameState};
use crate::rng::Rng;
use crate::roster::{Player, Roster, Team};

/// Pacing hint after an ordinary play, in milliseconds.
pub const STANDARD_DELAY: u64 = 5_000;

/// Pacing hint after a play on which a run scored.
pub const SCORE_DELAY: u64 = STANDARD_DELAY * 2;

/// Pacing hint after the opening tick.
pub const START_DELAY: u64 = 1_000;

/// Final inning index after which a decided game ends.
pub const LAST_INNING: i32 = 8;

const STEAL_ATTEMPT: f64 = 0.05;
const CAUGHT_STEALING: f64 = 0.5;
const IN_ZONE: f64 = 0.5;
const SWING_IN_ZONE: f64 = 0.6;
const SWING_OUT_OF_ZONE: f64 = 0.4;
const CONTACT_IN_ZONE: f64 = 0.5;
const CONTACT_OUT_OF_ZONE: f64 = 0.2;
const FAIR: f64 = 0.8;
const FIELDED: f64 = 0.6;
const FLY_OUT: f64 = 0.1;
const HOME_RUN: f64 = 0.1;
const TRIPLE: f64 = 0.15;
const DOUBLE: f64 = 0.4;

/// Advance `state` by one phase.
///
/// Returns a pacing hint in milliseconds, or `None` once the game is over
/// and should no longer be scheduled.
///
/// # Errors
///
/// Returns an error if a team or player referenced by the game is missing
/// from the roster. This cannot happen for games built from a validated
/// roster.
pub fn tick(rng: &mut Rng, roster: &Roster, state: &mut GameState) -> SimResult<Option<u64>> {
    let home = roster.team(&state.home_team)?;
    let away = roster.team(&state.away_team)?;

    match state.phase {
        GamePhase::NotStarted => {
            state.home_score = 0;
            state.away_score = 0;
            state.last_update = "Let's go".to_string();
            state.phase = GamePhase::StartGame;
            Ok(Some(START_DELAY))
        }
        GamePhase::StartGame => {
            // Bottom of the 0th, so the first half-inning flip lands on the top of the 1st.
            state.inning = -1;
            state.top = false;
            state.home_batter_index = -1;
            state.away_batter_index = -1;
            state.last_update = "Play Ball!".to_string();
            state.phase = GamePhase::StartHalfInning;
            Ok(Some(STANDARD_DELAY))
        }
        GamePhase::StartHalfInning => {
            if state.top {
                state.top = false;
                state.last_update = format!(
                    "Bottom of {}, {} batting.",
                    i64::from(state.inning) + 1,
                    home.full_name
                );
            } else {
                state.top = true;
                state.inning = state.inning.saturating_add(1);
                state.last_update = format!(
                    "Top of {}, {} batting.",
                    i64::from(state.inning) + 1,
                    away.full_name
                );
            }
            state.phase = GamePhase::BatterUp;
            Ok(Some(STANDARD_DELAY))
        }
        GamePhase::BatterUp => {
            let (team, index) = if state.top {
                state.away_batter_index = state.away_batter_index.saturating_add(1);
                (away, state.away_batter_index)
            } else {
                state.home_batter_index = state.home_batter_index.saturating_add(1);
                (home, state.home_batter_index)
            };
            let batter = roster.player(team.batter_id(index))?;
            state.last_update = format!("{} batting for the {}.", batter.name, team.nickname);
            state.phase = GamePhase::Pitch;
            Ok(Some(STANDARD_DELAY))
        }
        GamePhase::Pitch => {
            let (batting, fielding) = if state.top { (away, home) } else { (home, away) };
            let index = if state.top {
                state.away_batter_index
            } else {
                state.home_batter_index
            };
            let batter = roster.player(batting.batter_id(index))?;
            pitch(rng, roster, state, batter, fielding)
        }
        GamePhase::GameOver => {
            state.last_update = "Game over.".to_string();
            Ok(None)
        }
    }
}

fn pitch(
    rng: &mut Rng,
    roster: &Roster,
    state: &mut GameState,
    batter: &Player,
    fielding: &Team,
) -> SimResult<Option<u64>> {
    // Only the lead runner ever tries to steal.
    if !state.runners.is_empty() && rng.chance(STEAL_ATTEMPT) {
        return Ok(Some(steal(rng, state)));
    }

    let in_zone = rng.chance(IN_ZONE);
    let swings = rng.chance(if in_zone { SWING_IN_ZONE } else { SWING_OUT_OF_ZONE });
    if !swings {
        if in_zone {
            state.strikes += 1;
            state.last_update = format!("Strike, looking. {}-{}", state.balls, state.strikes);
        } else {
            state.balls += 1;
            state.last_update = format!("Ball. {}-{}", state.balls, state.strikes);
        }
    } else if !rng.chance(if in_zone { CONTACT_IN_ZONE } else { CONTACT_OUT_OF_ZONE }) {
        state.strikes += 1;
        state.last_update = format!("Strike, swinging. {}-{}", state.balls, state.strikes);
    } else if !rng.chance(FAIR) {
        // A foul never makes the third strike.
        if state.strikes < 2 {
            state.strikes += 1;
        }
        state.last_update = format!("Foul Ball. {}-{}", state.balls, state.strikes);
    } else {
        ball_in_play(rng, roster, state, batter, fielding)?;
    }

    if state.balls >= 4 {
        state.reset_count();
        bases::walk(&mut state.runners, &batter.name);
        state.last_update = format!("{} draws a walk.", batter.name);
        state.phase = GamePhase::BatterUp;
    }

    // A strikeout keeps the strike line as its text.
    if state.strikes >= 3 {
        state.outs += 1;
        state.reset_count();
    }

    let runs = settle(state);
    Ok(Some(if runs > 0 { SCORE_DELAY } else { STANDARD_DELAY }))
}

/// Lead runner attempts a steal. Returns the pacing hint.
fn steal(rng: &mut Rng, state: &mut GameState) -> u64 {
    if rng.chance(CAUGHT_STEALING) {
        let lead = state.runners.remove(0);
        state.last_update = format!(
            "{} gets caught stealing {} base.",
            lead.name,
            base_name(lead.base + 1)
        );
        state.outs += 1;
        settle(state);
        return STANDARD_DELAY;
    }

    let lead = &mut state.runners[0];
    lead.base += 1;
    if lead.base >= 4 {
        let lead = state.runners.remove(0);
        state.credit_runs(1);
        state.last_update = format!("{} steals home!", lead.name);
        SCORE_DELAY
    } else {
        state.last_update = format!("{} steals {} base!", lead.name, base_name(lead.base));
        STANDARD_DELAY
    }
}

/// Resolve a fair ball. The batter is done either way.
fn ball_in_play(
    rng: &mut Rng,
    roster: &Roster,
    state: &mut GameState,
    batter: &Player,
    fielding: &Team,
) -> SimResult<()> {
    state.phase = GamePhase::BatterUp;
    state.reset_count();

    if rng.chance(FIELDED) {
        let fly = rng.chance(FLY_OUT);
        state.outs += 1;
        let fielder = choose_fielder(rng, roster, fielding)?;
        if fly {
            state.last_update = format!("{} hit a flyout to {}.", batter.name, fielder.name);
        } else {
            state.last_update = format!("{} hit a ground out to {}.", batter.name, fielder.name);
            bases::maybe_advance(rng, &mut state.runners, GROUND_OUT_ADVANCE);
        }
        return Ok(());
    }

    if rng.chance(HOME_RUN) {
        let runs = u32::try_from(state.runners.len()).unwrap_or(u32::MAX) + 1;
        state.credit_runs(runs);
        state.runners.clear();
        state.last_update = format!("{} hits a {} home run!", batter.name, describe_home_run(runs));
        return Ok(());
    }

    let (bases, label) = if rng.chance(TRIPLE) {
        (3, "Triple")
    } else if rng.chance(DOUBLE) {
        (2, "Double")
    } else {
        (1, "Single")
    };
    bases::hit(&mut state.runners, &batter.name, bases);
    state.last_update = format!("{} hits a {label}!", batter.name);
    Ok(())
}

fn choose_fielder<'r>(rng: &mut Rng, roster: &'r Roster, team: &Team) -> SimResult<&'r Player> {
    let index = rng.below(team.lineup.len());
    roster.player(&team.lineup[index])
}

fn describe_home_run(runs: u32) -> String {
    if runs == 1 {
        "solo".to_string()
    } else {
        format!("{runs}-run")
    }
}

/// Close out the half inning on three outs, otherwise bring home scorers.
///
/// Returns the number of runs that scored.
fn settle(state: &mut GameState) -> u32 {
    if state.outs >= 3 {
        state.outs = 0;
        state.reset_count();
        state.runners.clear();

        let decided = if state.top {
            state.home_score > state.away_score
        } else {
            state.home_score != state.away_score
        };
        state.phase = if state.inning >= LAST_INNING && decided {
            GamePhase::GameOver
        } else {
            GamePhase::StartHalfInning
        };
        return 0;
    }

    // No runs count on the third out.
    let runs = bases::take_scored(&mut state.runners);
    state.credit_runs(runs);
    match runs {
        0 => {}
        1 => state.last_update.push_str(" 1 scores."),
        n => state.last_update.push_str(&format!(" {n} score.")),
    }
    runs
}
