//! Game invariants - sanity checks that detect bugs.
//!
//! These hold between ticks for every reachable game. They are checked after
//! each tick in debug builds and whenever a snapshot is restored.

use crate::game::GameState;

/// Highest batting-order position a restored game may carry.
pub const MAX_BATTER_INDEX: i64 = 1 << 48;

/// Highest zero-based inning a restored game may carry.
pub const MAX_INNING: i32 = 1 << 20;

/// Highest score either side of a restored game may carry.
pub const MAX_SCORE: u32 = 1 << 24;

/// Invariant violation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut violated = |message: String| violations.push(InvariantViolation { message });

    if state.balls > 3 {
        violated(format!("{} balls in the count", state.balls));
    }
    if state.strikes > 2 {
        violated(format!("{} strikes in the count", state.strikes));
    }
    if state.outs > 2 {
        violated(format!("{} outs recorded between plays", state.outs));
    }
    if state.inning < -1 {
        violated(format!("inning {} is before the opening sentinel", state.inning));
    }
    for (side, index) in [
        ("home", state.home_batter_index),
        ("away", state.away_batter_index),
    ] {
        if index < -1 {
            violated(format!("{side} batter index {index} is before the opening sentinel"));
        }
    }

    let mut ahead: Option<u8> = None;
    for runner in &state.runners {
        if !(1..=3).contains(&runner.base) {
            violated(format!("{} is standing on base {}", runner.name, runner.base));
        }
        if let Some(base) = ahead.filter(|base| runner.base >= *base) {
            violated(format!(
                "{} on base {} is not behind the runner on base {base}",
                runner.name, runner.base
            ));
        }
        ahead = Some(runner.base);
    }

    violations
}

/// Check that a game's counters sit far enough below their integer limits
/// to be ticked safely.
///
/// Play only ever moves these counters up, so this is applied to games
/// coming in from outside rather than after every tick.
#[must_use]
pub fn check_ceilings(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut violated = |message: String| violations.push(InvariantViolation { message });

    if state.inning > MAX_INNING {
        violated(format!("inning {} is past {MAX_INNING}", state.inning));
    }
    for (side, index) in [
        ("home", state.home_batter_index),
        ("away", state.away_batter_index),
    ] {
        if index > MAX_BATTER_INDEX {
            violated(format!("{side} batter index {index} is past {MAX_BATTER_INDEX}"));
        }
    }
    for (side, score) in [("home", state.home_score), ("away", state.away_score)] {
        if score > MAX_SCORE {
            violated(format!("{side} score {score} is past {MAX_SCORE}"));
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Runner;

    #[test]
    fn test_fresh_game_is_clean() {
        assert!(check_invariants(&GameState::new("h", "a")).is_empty());
    }

    #[test]
    fn test_count_overflow_detected() {
        let mut game = GameState::new("h", "a");
        game.balls = 4;
        game.outs = 3;
        assert_eq!(check_invariants(&game).len(), 2);
    }

    #[test]
    fn test_shared_base_detected() {
        let mut game = GameState::new("h", "a");
        game.runners = vec![Runner::new("a", 2), Runner::new("b", 2)];
        let violations = check_invariants(&game);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].to_string().contains("not behind"));
    }

    #[test]
    fn test_batter_index_before_sentinel_detected() {
        let mut game = GameState::new("h", "a");
        game.home_batter_index = -2;
        assert_eq!(check_invariants(&game).len(), 1);
        assert!(check_ceilings(&game).is_empty());
    }

    #[test]
    fn test_runaway_counters_detected() {
        let mut game = GameState::new("h", "a");
        game.away_batter_index = i64::MAX;
        game.inning = i32::MAX;
        game.home_score = u32::MAX;
        assert_eq!(check_ceilings(&game).len(), 3);
        assert!(check_invariants(&game).is_empty());

        game.away_batter_index = MAX_BATTER_INDEX;
        game.inning = MAX_INNING;
        game.home_score = MAX_SCORE;
        assert!(check_ceilings(&game).is_empty());
    }

    #[test]
    fn test_scored_runner_left_on_base_detected() {
        let mut game = GameState::new("h", "a");
        game.runners = vec![Runner::new("a", 4)];
        assert_eq!(check_invariants(&game).len(), 1);
    }
}
