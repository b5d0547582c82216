#![no_main]

//! Game state machine fuzzer.
//!
//! Starts a game from an arbitrary but well-formed mid-game position and
//! ticks it with arbitrary seeds, checking after every transition that:
//! 1. The count, outs, and runner ordering stay in bounds
//! 2. Scores never decrease
//! 3. A finished game stays finished

use arbitrary::Arbitrary;
use blasebox::game::{GamePhase, GameState, Runner, check_invariants, tick};
use blasebox::roster::{LeagueConfig, generate_league};
use blasebox::Rng;
use libfuzzer_sys::fuzz_target;

/// Structured input for a fuzzed position.
#[derive(Arbitrary, Debug)]
struct TickInput {
    /// Generator seeds.
    seeds: (u64, u64),
    /// Roster shape.
    lineup_size: u8,
    rotation_size: u8,
    /// Starting position.
    phase: u8,
    inning: u8,
    top: bool,
    home_score: u8,
    away_score: u8,
    home_batter_index: i16,
    away_batter_index: i16,
    balls: u8,
    strikes: u8,
    outs: u8,
    /// Occupied bases as a bitmask (bit 0 = first).
    bases: u8,
    /// Ticks to run.
    ticks: u16,
}

const PHASES: [GamePhase; 6] = [
    GamePhase::NotStarted,
    GamePhase::StartGame,
    GamePhase::StartHalfInning,
    GamePhase::BatterUp,
    GamePhase::Pitch,
    GamePhase::GameOver,
];

fuzz_target!(|input: TickInput| {
    let config = LeagueConfig {
        teams: 2,
        lineup_size: usize::from(input.lineup_size % 12) + 1,
        rotation_size: usize::from(input.rotation_size % 6) + 1,
    };
    let Ok(roster) = generate_league(input.seeds.0, &config) else {
        return;
    };
    let ids = roster.team_ids();

    let mut game = GameState::new(ids[0].clone(), ids[1].clone());
    game.phase = PHASES[usize::from(input.phase) % PHASES.len()];
    game.inning = i32::from(input.inning % 16);
    game.top = input.top;
    game.home_score = u32::from(input.home_score);
    game.away_score = u32::from(input.away_score);
    game.home_batter_index = i64::from(input.home_batter_index);
    game.away_batter_index = i64::from(input.away_batter_index);
    game.balls = input.balls;
    game.strikes = input.strikes;
    game.outs = input.outs;
    for base in [3u8, 2, 1] {
        if input.bases & (1 << (base - 1)) != 0 {
            game.runners.push(Runner::new(format!("runner{base}"), base));
        }
    }
    if !check_invariants(&game).is_empty() {
        return;
    }

    let mut rng = Rng::new(input.seeds.0, input.seeds.1);
    for _ in 0..input.ticks {
        let (home, away) = (game.home_score, game.away_score);
        let was_over = game.is_over();
        let resets = game.phase == GamePhase::NotStarted;
        let Ok(hint) = tick(&mut rng, &roster, &mut game) else {
            panic!("tick failed on a validated roster");
        };

        let violations = check_invariants(&game);
        assert!(violations.is_empty(), "{violations:?}");
        if !resets {
            assert!(game.home_score >= home && game.away_score >= away);
        }
        if was_over {
            assert!(hint.is_none());
            assert!(game.is_over());
            break;
        }
    }
});
