//! Players, teams, and the validated roster a universe is built from.
//!
//! Only ids, display names, lineups, and rotations are read by the
//! simulation. Every other attribute a roster supplier attaches is kept
//! verbatim in `extra` so snapshots round-trip it untouched.

mod generate;

pub use generate::{LeagueConfig, generate_league};

use crate::error::{RosterSlot, SimError, SimResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Stable identifier.
    pub id: String,
    /// Display name used in play-by-play.
    pub name: String,
    /// Opaque presentation payload.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Player {
    /// Create a player with no extra attributes.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            extra: serde_json::Map::new(),
        }
    }
}

/// A team and its ordered player lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    /// Stable identifier.
    pub id: String,
    /// Short display name.
    #[serde(default)]
    pub name: String,
    /// Full display name, e.g. "Hades Tigers".
    pub full_name: String,
    /// Nickname, e.g. "Tigers".
    pub nickname: String,
    /// Batting order; indexed cyclically.
    pub lineup: Vec<String>,
    /// Starting pitchers; indexed cyclically by day.
    pub rotation: Vec<String>,
    /// Opaque presentation payload.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Team {
    /// Player id batting at `index`, wrapping in both directions.
    ///
    /// # Panics
    ///
    /// Panics if the lineup is empty, which a validated [`Roster`] rules out.
    #[must_use]
    pub fn batter_id(&self, index: i64) -> &str {
        &self.lineup[wrap(index, self.lineup.len())]
    }

    /// Player id starting on the mound on `day`.
    ///
    /// # Panics
    ///
    /// Panics if the rotation is empty, which a validated [`Roster`] rules out.
    #[must_use]
    pub fn pitcher_id(&self, day: u64) -> &str {
        &self.rotation[wrap_unsigned(day, self.rotation.len())]
    }

    fn slot(&self, slot: RosterSlot) -> &[String] {
        match slot {
            RosterSlot::Lineup => &self.lineup,
            RosterSlot::Rotation => &self.rotation,
        }
    }
}

// Lineups are tiny, so the casts cannot truncate.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
fn wrap(index: i64, len: usize) -> usize {
    index.rem_euclid(len as i64) as usize
}

#[allow(clippy::cast_possible_truncation)]
fn wrap_unsigned(index: u64, len: usize) -> usize {
    (index % len as u64) as usize
}

/// Immutable, validated lookup tables for players and teams.
///
/// Team order is the order teams were supplied in. It feeds the matchup
/// shuffle, so it is part of a universe's identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    players: IndexMap<String, Player>,
    teams: IndexMap<String, Team>,
}

impl Roster {
    /// Build a roster from player and team lists.
    ///
    /// # Errors
    ///
    /// Returns an error if any lineup or rotation id has no matching player,
    /// if a lineup or rotation is empty, or if there are no teams.
    pub fn new(players: Vec<Player>, teams: Vec<Team>) -> SimResult<Self> {
        let players = players.into_iter().map(|p| (p.id.clone(), p)).collect();
        let teams = teams.into_iter().map(|t| (t.id.clone(), t)).collect();
        Self::from_maps(players, teams)
    }

    /// Build a roster from maps keyed by id.
    ///
    /// # Errors
    ///
    /// Same as [`Roster::new`].
    pub fn from_maps(
        players: IndexMap<String, Player>,
        teams: IndexMap<String, Team>,
    ) -> SimResult<Self> {
        let roster = Self { players, teams };
        roster.validate()?;
        Ok(roster)
    }

    fn validate(&self) -> SimResult<()> {
        if self.teams.is_empty() {
            return Err(SimError::EmptyLeague);
        }
        for team in self.teams.values() {
            for slot in [RosterSlot::Lineup, RosterSlot::Rotation] {
                let ids = team.slot(slot);
                if ids.is_empty() {
                    return Err(SimError::EmptySlot {
                        team: team.id.clone(),
                        slot,
                    });
                }
                if let Some(missing) = ids.iter().find(|id| !self.players.contains_key(*id)) {
                    return Err(SimError::RosterIntegrity {
                        team: team.id.clone(),
                        player: missing.clone(),
                        slot,
                    });
                }
            }
        }
        Ok(())
    }

    /// Look up a player by id.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownPlayer`] if the id is not present.
    pub fn player(&self, id: &str) -> SimResult<&Player> {
        self.players
            .get(id)
            .ok_or_else(|| SimError::UnknownPlayer(id.to_string()))
    }

    /// Look up a team by id.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownTeam`] if the id is not present.
    pub fn team(&self, id: &str) -> SimResult<&Team> {
        self.teams
            .get(id)
            .ok_or_else(|| SimError::UnknownTeam(id.to_string()))
    }

    /// Whether a team id is present.
    #[must_use]
    pub fn has_team(&self, id: &str) -> bool {
        self.teams.contains_key(id)
    }

    /// All teams, in supply order.
    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.teams.values()
    }

    /// Team ids, in supply order.
    #[must_use]
    pub fn team_ids(&self) -> Vec<String> {
        self.teams.keys().cloned().collect()
    }

    /// Number of teams.
    #[must_use]
    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    /// Players keyed by id.
    #[must_use]
    pub fn player_map(&self) -> &IndexMap<String, Player> {
        &self.players
    }

    /// Teams keyed by id.
    #[must_use]
    pub fn team_map(&self) -> &IndexMap<String, Team> {
        &self.teams
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(id: &str, lineup: &[&str], rotation: &[&str]) -> Team {
        Team {
            id: id.to_string(),
            name: id.to_string(),
            full_name: format!("{id} Full"),
            nickname: format!("{id}s"),
            lineup: lineup.iter().map(ToString::to_string).collect(),
            rotation: rotation.iter().map(ToString::to_string).collect(),
            extra: serde_json::Map::new(),
        }
    }

    fn players(ids: &[&str]) -> Vec<Player> {
        ids.iter().map(|id| Player::new(*id, id.to_uppercase())).collect()
    }

    #[test]
    fn test_valid_roster() {
        let roster = Roster::new(
            players(&["a", "b", "c"]),
            vec![team("t1", &["a", "b"], &["c"])],
        )
        .unwrap();
        assert_eq!(roster.team_count(), 1);
        assert_eq!(roster.player("b").unwrap().name, "B");
    }

    #[test]
    fn test_missing_lineup_player_is_fatal() {
        let err = Roster::new(players(&["a"]), vec![team("t1", &["a", "ghost"], &["a"])])
            .unwrap_err();
        assert_eq!(
            err,
            SimError::RosterIntegrity {
                team: "t1".to_string(),
                player: "ghost".to_string(),
                slot: RosterSlot::Lineup,
            }
        );
    }

    #[test]
    fn test_missing_rotation_player_is_fatal() {
        let err = Roster::new(players(&["a"]), vec![team("t1", &["a"], &["ghost"])]).unwrap_err();
        assert!(matches!(
            err,
            SimError::RosterIntegrity {
                slot: RosterSlot::Rotation,
                ..
            }
        ));
    }

    #[test]
    fn test_empty_lineup_rejected() {
        let err = Roster::new(players(&["a"]), vec![team("t1", &[], &["a"])]).unwrap_err();
        assert!(matches!(err, SimError::EmptySlot { .. }));
    }

    #[test]
    fn test_empty_league_rejected() {
        assert_eq!(
            Roster::new(players(&["a"]), Vec::new()).unwrap_err(),
            SimError::EmptyLeague
        );
    }

    #[test]
    fn test_batter_index_wraps_both_ways() {
        let t = team("t1", &["a", "b", "c"], &["a"]);
        assert_eq!(t.batter_id(0), "a");
        assert_eq!(t.batter_id(4), "b");
        assert_eq!(t.batter_id(-1), "c");
    }

    #[test]
    fn test_pitcher_cycles_by_day() {
        let t = team("t1", &["a"], &["p1", "p2"]);
        assert_eq!(t.pitcher_id(0), "p1");
        assert_eq!(t.pitcher_id(3), "p2");
    }

    #[test]
    fn test_team_order_is_supply_order() {
        let roster = Roster::new(
            players(&["a"]),
            vec![team("zeta", &["a"], &["a"]), team("alpha", &["a"], &["a"])],
        )
        .unwrap();
        assert_eq!(roster.team_ids(), vec!["zeta".to_string(), "alpha".to_string()]);
    }

    #[test]
    fn test_extra_attributes_round_trip() {
        let json = r#"{"id":"p1","name":"Jessica Telephone","batting":0.9,"deceased":false}"#;
        let player: Player = serde_json::from_str(json).unwrap();
        assert_eq!(player.name, "Jessica Telephone");
        assert_eq!(player.extra.len(), 2);
        let back = serde_json::to_value(&player).unwrap();
        assert_eq!(back["deceased"], serde_json::Value::Bool(false));
    }
}
