//! Error types for the league simulator.

use std::fmt;

/// Which ordered player list on a team an id came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterSlot {
    /// The batting lineup.
    Lineup,
    /// The pitching rotation.
    Rotation,
}

impl fmt::Display for RosterSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterSlot::Lineup => write!(f, "lineup"),
            RosterSlot::Rotation => write!(f, "rotation"),
        }
    }
}

/// Errors raised while building, ticking, or restoring a simulation.
///
/// None of these are transient: every operation is a pure computation over
/// in-memory state, so callers should treat any of them as fatal for the
/// universe involved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimError {
    /// A lineup or rotation references a player that is not in the roster.
    #[error("team {team} lists unknown player {player} in its {slot}")]
    RosterIntegrity {
        /// Team whose list holds the dangling id.
        team: String,
        /// The unresolved player id.
        player: String,
        /// Which list the id was found in.
        slot: RosterSlot,
    },
    /// A lineup or rotation has no entries.
    #[error("team {team} has an empty {slot}")]
    EmptySlot {
        /// The offending team.
        team: String,
        /// Which list is empty.
        slot: RosterSlot,
    },
    /// The roster contains no teams at all.
    #[error("league has no teams")]
    EmptyLeague,
    /// Teams can only be paired off when there is an even number of them.
    #[error("cannot pair an odd number of teams ({0})")]
    OddTeamCount(usize),
    /// A player lookup failed after construction succeeded.
    #[error("unknown player {0}")]
    UnknownPlayer(String),
    /// A team lookup failed after construction succeeded.
    #[error("unknown team {0}")]
    UnknownTeam(String),
    /// Both generator words are zero, which pins xorshift128+ at zero forever.
    #[error("generator seeds are both zero")]
    ZeroSeed,
    /// A persisted snapshot cannot be turned back into a simulation.
    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_integrity_message() {
        let err = SimError::RosterIntegrity {
            team: "moist-talkers".to_string(),
            player: "p-404".to_string(),
            slot: RosterSlot::Rotation,
        };
        assert_eq!(
            err.to_string(),
            "team moist-talkers lists unknown player p-404 in its rotation"
        );
    }

    #[test]
    fn test_odd_team_count_message() {
        assert_eq!(
            SimError::OddTeamCount(3).to_string(),
            "cannot pair an odd number of teams (3)"
        );
    }

    #[test]
    fn test_zero_seed_message() {
        assert_eq!(SimError::ZeroSeed.to_string(), "generator seeds are both zero");
    }
}
