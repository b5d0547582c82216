//! Integration tests for determinism and resumability.
//!
//! Two universes built from the same seeds, roster, and start time must
//! agree byte for byte however they are advanced, saved, and restored.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::unreadable_literal)]

use blasebox::roster::{LeagueConfig, generate_league};
use blasebox::schedule::SERIES_LENGTH;
use blasebox::{
    GamePhase, Origin, Player, Rng, Roster, Sim, SimError, TICK_MS, Team, Universe,
};

fn league(teams: usize) -> Roster {
    let config = LeagueConfig {
        teams,
        ..LeagueConfig::default()
    };
    generate_league(2024, &config).unwrap()
}

fn team(id: &str, prefix: &str) -> (Team, Vec<Player>) {
    let players: Vec<Player> = (0..9)
        .map(|i| Player::new(format!("{prefix}{i}"), format!("{prefix} Player {i}")))
        .collect();
    let team = Team {
        id: id.to_string(),
        name: id.to_string(),
        full_name: format!("The {id}s"),
        nickname: format!("{id}s"),
        lineup: players.iter().map(|p| p.id.clone()).collect(),
        rotation: vec![players[0].id.clone()],
        extra: serde_json::Map::new(),
    };
    (team, players)
}

fn two_team_roster() -> Roster {
    let (a, mut players) = team("A", "a");
    let (b, more) = team("B", "b");
    players.extend(more);
    Roster::new(players, vec![a, b]).unwrap()
}

#[test]
fn test_fresh_runs_are_identical() {
    let mut a = Sim::new(77, 88, league(8), 1_600_000_000_000).unwrap();
    let mut b = Sim::new(77, 88, league(8), 1_600_000_000_000).unwrap();
    let goal = 1_600_000_000_000 + 3_000 * TICK_MS;
    a.run_to_time(goal).unwrap();
    b.run_to_time(goal).unwrap();

    let ja = serde_json::to_string(&a.to_raw()).unwrap();
    let jb = serde_json::to_string(&b.to_raw()).unwrap();
    assert_eq!(ja, jb);
}

#[test]
fn test_catch_up_matches_stepping() {
    let mut batch = Sim::new(5, 6, league(4), 0).unwrap();
    let mut stepped = batch.clone();

    batch.run_to_time(500 * TICK_MS).unwrap();
    for _ in 0..500 {
        let next = stepped.next_tick_time();
        assert_eq!(stepped.run_to_time(next).unwrap(), 1);
    }
    assert_eq!(batch, stepped);
}

#[test]
fn test_snapshot_resume_is_invisible() {
    let mut straight = Sim::new(123, 456, league(6), 0).unwrap();
    let mut resumed = straight.clone();

    straight.run_to_time(2_000 * TICK_MS).unwrap();

    resumed.run_to_time(777 * TICK_MS).unwrap();
    let json = Universe::new(Origin::default(), resumed).to_json().unwrap();
    let mut resumed = Universe::from_json(&json).unwrap().sim;
    resumed.run_to_time(2_000 * TICK_MS).unwrap();

    assert_eq!(resumed, straight);
    assert_eq!(
        serde_json::to_string(&resumed.to_raw()).unwrap(),
        serde_json::to_string(&straight.to_raw()).unwrap()
    );
}

#[test]
fn test_file_round_trip_resumes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("universe.json");

    let mut straight = Sim::new(9, 10, league(4), 0).unwrap();
    let mut saved = Universe::new(Origin::default(), straight.clone());
    saved.sim.run_until_day(2).unwrap();
    saved.save(&path).unwrap();

    let mut loaded = Universe::load(&path).unwrap();
    loaded.sim.run_until_day(5).unwrap();
    straight.run_until_day(5).unwrap();
    assert_eq!(loaded.sim, straight);
}

#[test]
fn test_series_pairings_hold_for_three_days() {
    let mut sim = Sim::new(31, 41, league(10), 0).unwrap();
    let pairing = |sim: &Sim| -> Vec<(String, String)> {
        sim.state()
            .games
            .iter()
            .map(|g| (g.home_team.clone(), g.away_team.clone()))
            .collect()
    };

    for series in 0..4 {
        let opening = pairing(&sim);
        // Every team plays exactly once per day.
        let mut teams: Vec<&String> = opening.iter().flat_map(|(h, a)| [h, a]).collect();
        teams.sort();
        teams.dedup();
        assert_eq!(teams.len(), 10);

        for day in 1..SERIES_LENGTH {
            let rng_before = *sim.rng();
            let report = sim.play_day().unwrap();
            assert_eq!(report.day, series * SERIES_LENGTH + day - 1);
            assert_eq!(pairing(&sim), opening);
            assert_ne!(*sim.rng(), rng_before);
        }
        sim.play_day().unwrap();
        assert_eq!(sim.state().day, (series + 1) * SERIES_LENGTH);
    }
}

#[test]
fn test_every_game_ends_decided() {
    let mut sim = Sim::new(2, 3, league(8), 0).unwrap();
    for _ in 0..6 {
        let report = sim.play_day().unwrap();
        for game in &report.games {
            assert_eq!(game.phase, GamePhase::GameOver);
            assert_ne!(game.home_score, game.away_score);
            assert!(game.inning >= 8);
        }
    }
    assert_eq!(sim.state().records.decisions(), 6 * 8);
}

#[test]
fn test_golden_first_pitch() {
    let roster = two_team_roster();
    let mut sim = Sim::new(1398547, 382746019348, roster, 0).unwrap();

    // Two shuffle draws put the second team at home.
    let game = &sim.state().games[0];
    assert_eq!(game.home_team, "B");
    assert_eq!(game.away_team, "A");

    // Four bookkeeping ticks, then the first pitch.
    sim.run_to_time(4 * TICK_MS).unwrap();
    assert_eq!(sim.state().games[0].phase, GamePhase::Pitch);
    assert_eq!(sim.state().games[0].last_update, "a Player 0 batting for the As.");

    sim.run_to_time(5 * TICK_MS).unwrap();
    let game = &sim.state().games[0];
    assert_eq!(
        game.last_update,
        "a Player 0 hit a ground out to b Player 8."
    );
    assert_eq!((game.balls, game.strikes, game.outs), (0, 0, 1));
    assert_eq!(game.phase, GamePhase::BatterUp);
    assert!(game.runners.is_empty());

    // Shuffle (2) + zone, swing, contact, fair, fielded, fly, fielder (7).
    let mut expected = Rng::new(1398547, 382746019348);
    for _ in 0..9 {
        let _ = expected.next_f64();
    }
    assert_eq!(*sim.rng(), expected);
}

#[test]
fn test_odd_league_leaves_no_trace() {
    let config = LeagueConfig {
        teams: 5,
        ..LeagueConfig::default()
    };
    let roster = generate_league(1, &config).unwrap();
    assert_eq!(
        Sim::new(1, 2, roster, 0).unwrap_err(),
        SimError::OddTeamCount(5)
    );
}
