// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Blasebox: a deterministic simulator for an endless baseball-like league.
//!
//! Teams are paired into matchups, every matchup advances pitch by pitch
//! through a state machine fed by one seeded generator, and an orchestrator
//! ticks all of a day's games in lockstep with simulated wall-clock time.
//! The whole universe can be snapshotted and resumed with bit-identical
//! future behaviour.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Sim: run_to_time / records / days │──── Snapshot (JSON)
//! ├──────────────────┬──────────────────┤
//! │  Schedule        │  Game tick       │
//! │  (series, pairs) │  (one ply/call)  │
//! ├──────────────────┴──────────────────┤
//! │     Rng (xorshift128+), Roster      │
//! └─────────────────────────────────────┘
//! ```

pub mod error;
pub mod game;
pub mod rng;
pub mod roster;
pub mod schedule;
pub mod sim;
pub mod snapshot;
pub mod survey;

pub use error::{RosterSlot, SimError, SimResult};

// Re-export key types at crate root for convenience
pub use game::{GamePhase, GameState, Runner};
pub use rng::Rng;
pub use roster::{Player, Roster, Team};
pub use sim::{DayReport, Record, RecordBook, Sim, SimState, TICK_MS};
pub use snapshot::{Origin, PersistError, RawSim, RawUniverse, Universe};
pub use survey::{SurveyConfig, SurveySummary};
