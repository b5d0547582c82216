//! Plain, persistable representation of a universe.
//!
//! A snapshot captures everything needed to resume a universe with
//! bit-identical future behaviour: generator words, the full roster, and the
//! running state. Generator words are decimal strings because the JSON
//! consumers on the other side of the persistence boundary cannot hold a
//! full 64-bit integer exactly.

mod store;

pub use store::{
    CheckpointOutcome, CheckpointStore, DEFAULT_CHECKPOINT_INTERVAL_MS, FileStore, Throttled,
};

use crate::error::{SimError, SimResult};
use crate::game::{check_ceilings, check_invariants};
use crate::rng::Rng;
use crate::roster::{Player, Roster, Team};
use crate::sim::{Sim, SimState};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Errors crossing the persistence boundary.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The document is not valid JSON for a universe.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// The document parsed but does not describe a valid universe.
    #[error(transparent)]
    Sim(#[from] SimError),
}

/// Generator state as decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRng {
    /// First state word.
    pub s0: String,
    /// Second state word.
    pub s1: String,
}

impl From<&Rng> for RawRng {
    fn from(rng: &Rng) -> Self {
        let (s0, s1) = rng.state();
        Self {
            s0: s0.to_string(),
            s1: s1.to_string(),
        }
    }
}

impl TryFrom<&RawRng> for Rng {
    type Error = SimError;

    fn try_from(raw: &RawRng) -> SimResult<Self> {
        let word = |name: &str, text: &str| {
            text.parse::<u64>().map_err(|e| {
                SimError::MalformedSnapshot(format!("rng word {name} {text:?}: {e}"))
            })
        };
        let (s0, s1) = (word("s0", &raw.s0)?, word("s1", &raw.s1)?);
        if s0 == 0 && s1 == 0 {
            return Err(SimError::MalformedSnapshot(
                "rng words are both zero".to_string(),
            ));
        }
        Ok(Rng::new(s0, s1))
    }
}

/// Persistable form of a [`Sim`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSim {
    /// Generator state.
    pub rng: RawRng,
    /// Players keyed by id.
    pub players: IndexMap<String, Player>,
    /// Teams keyed by id, in schedule order.
    pub teams: IndexMap<String, Team>,
    /// Running state.
    pub state: SimState,
}

impl Sim {
    /// Capture the full state of this universe.
    #[must_use]
    pub fn to_raw(&self) -> RawSim {
        RawSim {
            rng: RawRng::from(self.rng()),
            players: self.roster().player_map().clone(),
            teams: self.roster().team_map().clone(),
            state: self.state().clone(),
        }
    }

    /// Rebuild a universe from a snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::MalformedSnapshot`] if the generator words do not
    /// parse or are both zero, a map key disagrees with the id it holds, the
    /// roster fails validation, a game names a team that is not in the
    /// roster, or a game breaks the count, runner, inning, score or
    /// batting-order bounds.
    pub fn from_raw(raw: RawSim) -> SimResult<Self> {
        let rng = Rng::try_from(&raw.rng)?;

        if let Some((key, player)) = raw.players.iter().find(|(key, p)| **key != p.id) {
            return Err(SimError::MalformedSnapshot(format!(
                "player stored under {key} has id {}",
                player.id
            )));
        }
        if let Some((key, team)) = raw.teams.iter().find(|(key, t)| **key != t.id) {
            return Err(SimError::MalformedSnapshot(format!(
                "team stored under {key} has id {}",
                team.id
            )));
        }

        let roster = Roster::from_maps(raw.players, raw.teams)
            .map_err(|e| SimError::MalformedSnapshot(e.to_string()))?;

        for (i, game) in raw.state.games.iter().enumerate() {
            for team in [&game.home_team, &game.away_team] {
                if !roster.has_team(team) {
                    return Err(SimError::MalformedSnapshot(format!(
                        "game {i} references unknown team {team}"
                    )));
                }
            }
            if let Some(violation) = check_invariants(game)
                .into_iter()
                .chain(check_ceilings(game))
                .next()
            {
                return Err(SimError::MalformedSnapshot(format!("game {i}: {violation}")));
            }
        }

        Ok(Sim::from_parts(rng, roster, raw.state))
    }
}

/// Where a universe branched off from the real league.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
    /// Zero-based season; negative for the pre-season era.
    pub season: i32,
    /// Zero-based day within the season.
    pub day: i32,
    /// Milliseconds into that day.
    pub offset: i64,
}

/// Persistable form of a [`Universe`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawUniverse {
    /// Branch point.
    pub origin: Origin,
    /// Simulation snapshot.
    pub sim: RawSim,
}

/// A simulation together with the point it branched from.
#[derive(Debug, Clone, PartialEq)]
pub struct Universe {
    /// Branch point.
    pub origin: Origin,
    /// The running simulation.
    pub sim: Sim,
}

impl Universe {
    /// Wrap a simulation.
    #[must_use]
    pub fn new(origin: Origin, sim: Sim) -> Self {
        Self { origin, sim }
    }

    /// Capture a snapshot.
    #[must_use]
    pub fn to_raw(&self) -> RawUniverse {
        RawUniverse {
            origin: self.origin,
            sim: self.sim.to_raw(),
        }
    }

    /// Rebuild from a snapshot.
    ///
    /// # Errors
    ///
    /// See [`Sim::from_raw`].
    pub fn from_raw(raw: RawUniverse) -> SimResult<Self> {
        Ok(Self {
            origin: raw.origin,
            sim: Sim::from_raw(raw.sim)?,
        })
    }

    /// Serialize to a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string(&self.to_raw())?)
    }

    /// Parse and validate a JSON snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or describes an invalid universe.
    pub fn from_json(json: &str) -> Result<Self, PersistError> {
        let raw: RawUniverse = serde_json::from_str(json)?;
        Ok(Self::from_raw(raw)?)
    }

    /// Save to a file, replacing it atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file I/O fails.
    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        write_atomic(path, self.to_json()?.as_bytes())
    }

    /// Load from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid universe.
    pub fn load(path: &Path) -> Result<Self, PersistError> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}

/// Write via a sibling temp file and rename, so readers never see a torn file.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), PersistError> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
