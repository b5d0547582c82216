//! Matchup scheduling.
//!
//! A series is three consecutive days with the same pairings. Only the first
//! day of a series draws from the RNG; the other two replay the pairing with
//! fresh games.

use crate::error::{SimError, SimResult};
use crate::game::GameState;
use crate::rng::Rng;
use crate::roster::Roster;

/// Days in a series.
pub const SERIES_LENGTH: u64 = 3;

/// Whether `day` opens a new series and therefore reshuffles.
#[must_use]
pub const fn is_series_start(day: u64) -> bool {
    day % SERIES_LENGTH == 0
}

/// Fisher–Yates shuffle in place, walking the index down from the end.
///
/// Consumes exactly one draw per element, including the final swap of slot
/// zero with itself.
pub fn shuffle<T>(items: &mut [T], rng: &mut Rng) {
    let mut current = items.len();
    while current != 0 {
        let random = rng.below(current);
        current -= 1;
        items.swap(current, random);
    }
}

/// Pair consecutive teams as (home, away).
///
/// # Errors
///
/// Returns [`SimError::OddTeamCount`] when the list has odd length.
pub fn pair_up(team_ids: &[String]) -> SimResult<Vec<GameState>> {
    if team_ids.len() % 2 != 0 {
        return Err(SimError::OddTeamCount(team_ids.len()));
    }
    Ok(team_ids
        .chunks_exact(2)
        .map(|pair| GameState::new(pair[0].clone(), pair[1].clone()))
        .collect())
}

/// Draw a fresh set of matchups for every team in the roster.
///
/// The team count is checked before anything is drawn, so a failure leaves
/// the generator untouched.
///
/// # Errors
///
/// Returns [`SimError::OddTeamCount`] when the roster has an odd number of teams.
pub fn new_matchups(rng: &mut Rng, roster: &Roster) -> SimResult<Vec<GameState>> {
    let mut team_ids = roster.team_ids();
    if team_ids.len() % 2 != 0 {
        return Err(SimError::OddTeamCount(team_ids.len()));
    }
    shuffle(&mut team_ids, rng);
    pair_up(&team_ids)
}

/// Brand-new games with the same home/away pairing as `games`.
#[must_use]
pub fn rematches(games: &[GameState]) -> Vec<GameState> {
    games.iter().map(GameState::rematch).collect()
}
