//! Game layer for Blasebox.
//!
//! Implements one matchup as a pitch-by-pitch state machine:
//! - Game state (score, count, inning, runners)
//! - Base running (hits, walks, ground-out advancement)
//! - The one-ply `tick` driven by the shared RNG
//! - Invariant checks

mod bases;
mod invariants;
mod pitch;
mod state;

pub use bases::base_name;
pub use invariants::{
    InvariantViolation, MAX_BATTER_INDEX, MAX_INNING, MAX_SCORE, check_ceilings, check_invariants,
};
pub use pitch::{LAST_INNING, SCORE_DELAY, STANDARD_DELAY, START_DELAY, tick};
pub use state::{GamePhase, GameState, Runner};
