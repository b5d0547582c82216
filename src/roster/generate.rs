//! Deterministic synthetic leagues for demos, benchmarks, and tests.

use crate::error::SimResult;
use crate::rng::Rng;
use crate::roster::{Player, Roster, Team};

const FIRST: [&str; 16] = [
    "Jessica", "York", "Nagomi", "Wyatt", "Comfort", "Pitching", "Sebastian", "Aldon",
    "Mooney", "Jaylen", "Rivers", "Baldwin", "Sutton", "Landry", "Chorby", "Valentine",
];

const LAST: [&str; 16] = [
    "Telephone", "Silk", "Mcdaniel", "Mason", "Septemberish", "Machine", "Sunshine", "Cashmoney",
    "Doctor", "Hotdogfingers", "Rosa", "Breadwinner", "Dreamy", "Violence", "Soul", "Games",
];

const PLACES: [&str; 10] = [
    "Hades", "Baltimore", "Seattle", "Philly", "Charleston", "Boston", "Hawaii", "Canada",
    "Chicago", "Houston",
];

const MASCOTS: [&str; 10] = [
    "Tigers", "Crabs", "Garages", "Pies", "Shoe Thieves", "Flowers", "Fridays", "Moist Talkers",
    "Firefighters", "Spies",
];

/// Shape of a generated league.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeagueConfig {
    /// Number of teams.
    pub teams: usize,
    /// Batters per team.
    pub lineup_size: usize,
    /// Starting pitchers per team.
    pub rotation_size: usize,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            teams: 20,
            lineup_size: 9,
            rotation_size: 5,
        }
    }
}

/// Generate a league from a seed.
///
/// Uses its own generator, so the same seed and config always produce the
/// same roster regardless of how the universe is later seeded.
///
/// # Errors
///
/// Returns an error if the config produces an invalid roster (no teams, or
/// an empty lineup or rotation).
pub fn generate_league(seed: u64, config: &LeagueConfig) -> SimResult<Roster> {
    let mut rng = Rng::new(seed, seed.rotate_left(32) ^ 0x9E37_79B9_7F4A_7C15);
    // Warm up so small seeds do not start on near-zero draws.
    for _ in 0..16 {
        rng.next_f64();
    }

    let mut players = Vec::new();
    let mut teams = Vec::with_capacity(config.teams);

    for t in 0..config.teams {
        let team_id = format!("team-{t:03}");
        let mut roster_ids = Vec::with_capacity(config.lineup_size + config.rotation_size);
        for p in 0..config.lineup_size + config.rotation_size {
            let id = format!("{team_id}-p{p:02}");
            let name = format!("{} {}", FIRST[rng.below(FIRST.len())], LAST[rng.below(LAST.len())]);
            players.push(Player::new(id.clone(), name));
            roster_ids.push(id);
        }
        let rotation = roster_ids.split_off(config.lineup_size);

        let place = PLACES[t % PLACES.len()];
        let mascot = MASCOTS[(t / PLACES.len() + t) % MASCOTS.len()];
        teams.push(Team {
            id: team_id,
            name: place.to_string(),
            full_name: format!("{place} {mascot}"),
            nickname: mascot.to_string(),
            lineup: roster_ids,
            rotation,
            extra: serde_json::Map::new(),
        });
    }

    Roster::new(players, teams)
}
