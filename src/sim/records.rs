//! Win/loss records.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Wins and losses for one team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Games won.
    pub wins: u32,
    /// Games lost.
    pub losses: u32,
}

/// Team id to record, accumulated over a universe's lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordBook(IndexMap<String, Record>);

impl RecordBook {
    /// A book with a zeroed record for each team.
    #[must_use]
    pub fn zeroed<I, S>(team_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            team_ids
                .into_iter()
                .map(|id| (id.into(), Record::default()))
                .collect(),
        )
    }

    /// Credit one win and one loss.
    pub fn record_game(&mut self, winner: &str, loser: &str) {
        let winner = self.0.entry(winner.to_string()).or_default();
        winner.wins = winner.wins.saturating_add(1);
        let loser = self.0.entry(loser.to_string()).or_default();
        loser.losses = loser.losses.saturating_add(1);
    }

    /// Record for a team, zero if it has never played.
    #[must_use]
    pub fn get(&self, team_id: &str) -> Record {
        self.0.get(team_id).copied().unwrap_or_default()
    }

    /// All records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Record)> {
        self.0.iter().map(|(id, record)| (id.as_str(), *record))
    }

    /// Records sorted by wins descending, then losses ascending, then id.
    #[must_use]
    pub fn standings(&self) -> Vec<(&str, Record)> {
        let mut rows: Vec<_> = self.iter().collect();
        rows.sort_by(|(a_id, a), (b_id, b)| {
            b.wins
                .cmp(&a.wins)
                .then(a.losses.cmp(&b.losses))
                .then(a_id.cmp(b_id))
        });
        rows
    }

    /// Total games credited across all teams (each game counts twice).
    #[must_use]
    pub fn decisions(&self) -> u64 {
        self.0
            .values()
            .map(|r| u64::from(r.wins) + u64::from(r.losses))
            .sum()
    }
}
