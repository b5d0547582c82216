//! Output formatting utilities for CLI.

use blasebox::{GamePhase, GameState, Roster, SurveySummary, Universe};
use serde::Serialize;
use std::fmt::Write;

/// Display name for a team, falling back to its id.
fn team_label<'r>(roster: &'r Roster, id: &'r str) -> &'r str {
    roster
        .team(id)
        .ok()
        .map(|t| if t.full_name.is_empty() { t.name.as_str() } else { t.full_name.as_str() })
        .filter(|name| !name.is_empty())
        .unwrap_or(id)
}

/// Short inning description, e.g. `Top 3` or `final`.
pub(super) fn describe_inning(game: &GameState) -> String {
    match game.phase {
        GamePhase::NotStarted | GamePhase::StartGame => "pregame".to_string(),
        GamePhase::GameOver => "final".to_string(),
        _ if game.inning < 0 => "pregame".to_string(),
        _ => {
            let half = if game.top { "Top" } else { "Bot" };
            format!("{half} {}", game.inning + 1)
        }
    }
}

/// Starting pitchers for `day` as `away vs home`, empty if either is missing.
fn describe_pitchers(roster: &Roster, day: u64, game: &GameState) -> String {
    game.pitchers(roster, day)
        .map_or_else(|_| String::new(), |(home, away)| format!("{} vs {}", away.name, home.name))
}

/// One line per game.
fn format_game_line(roster: &Roster, day: u64, game: &GameState) -> String {
    format!(
        "  {} {} @ {} {} | {} | {} | {}-{}, {} out | {}",
        team_label(roster, &game.away_team),
        game.away_score,
        team_label(roster, &game.home_team),
        game.home_score,
        describe_pitchers(roster, day, game),
        describe_inning(game),
        game.balls,
        game.strikes,
        game.outs,
        game.last_update
    )
}

/// Latest play of a game, prefixed with the matchup.
pub(super) fn format_play(roster: &Roster, day: u64, game: &GameState) -> String {
    format!(
        "[day {}] {} @ {}: {}",
        day + 1,
        team_label(roster, &game.away_team),
        team_label(roster, &game.home_team),
        game.last_update
    )
}

/// Format the current day's games as human-readable text.
pub(super) fn format_scoreboard(universe: &Universe) -> String {
    let state = universe.sim.state();
    let roster = universe.sim.roster();
    let mut output = String::new();

    let _ = writeln!(
        output,
        "Day {} (tick {}, time {})",
        state.day + 1,
        state.tick,
        state.time
    );
    for game in &state.games {
        output.push_str(&format_game_line(roster, state.day, game));
        output.push('\n');
    }

    output
}

/// JSON-serializable scoreboard.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct JsonScoreboard<'a> {
    /// Days completed.
    day: u64,
    /// Ticks run.
    tick: u64,
    /// Simulated epoch milliseconds.
    time: i64,
    /// Today's games.
    games: Vec<JsonGame<'a>>,
}

/// JSON-serializable game line.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct JsonGame<'a> {
    home_team: &'a str,
    away_team: &'a str,
    home_score: u32,
    away_score: u32,
    home_pitcher: Option<&'a str>,
    away_pitcher: Option<&'a str>,
    inning: String,
    balls: u8,
    strikes: u8,
    outs: u8,
    last_update: &'a str,
}

impl<'a> JsonScoreboard<'a> {
    /// Create from a universe.
    pub(super) fn from_universe(universe: &'a Universe) -> Self {
        let state = universe.sim.state();
        let roster = universe.sim.roster();
        Self {
            day: state.day,
            tick: state.tick,
            time: state.time,
            games: state
                .games
                .iter()
                .map(|g| {
                    let pitchers = g.pitchers(roster, state.day).ok();
                    JsonGame {
                        home_team: team_label(roster, &g.home_team),
                        away_team: team_label(roster, &g.away_team),
                        home_score: g.home_score,
                        away_score: g.away_score,
                        home_pitcher: pitchers.map(|(home, _)| home.name.as_str()),
                        away_pitcher: pitchers.map(|(_, away)| away.name.as_str()),
                        inning: describe_inning(g),
                        balls: g.balls,
                        strikes: g.strikes,
                        outs: g.outs,
                        last_update: &g.last_update,
                    }
                })
                .collect(),
        }
    }
}

/// JSON-serializable standings row.
#[derive(Debug, Serialize)]
pub(super) struct JsonStanding<'a> {
    /// Team id.
    id: &'a str,
    /// Display name.
    team: &'a str,
    /// Games won.
    wins: u32,
    /// Games lost.
    losses: u32,
}

/// Standings rows, best record first.
pub(super) fn standings(universe: &Universe) -> Vec<JsonStanding<'_>> {
    let roster = universe.sim.roster();
    universe
        .sim
        .state()
        .records
        .standings()
        .into_iter()
        .map(|(id, record)| JsonStanding {
            id,
            team: team_label(roster, id),
            wins: record.wins,
            losses: record.losses,
        })
        .collect()
}

/// Format standings as human-readable text.
pub(super) fn format_standings(universe: &Universe) -> String {
    let rows = standings(universe);
    let width = rows.iter().map(|r| r.team.len()).max().unwrap_or(0);
    let mut output = String::new();

    let _ = writeln!(output, "Standings after {} days", universe.sim.state().day);
    for (i, row) in rows.iter().enumerate() {
        let _ = writeln!(
            output,
            "  {:>2}. {:<width$}  {:>3}-{:<3}",
            i + 1,
            row.team,
            row.wins,
            row.losses
        );
    }

    output
}

/// JSON-serializable survey result.
#[derive(Debug, Serialize)]
pub(super) struct JsonSurveyResult {
    /// Raw counters.
    #[serde(flatten)]
    summary: SurveySummary,
    /// Mean runs per game.
    runs_per_game: f64,
    /// Home win rate (0.0-1.0).
    home_win_rate: f64,
    /// Mean ticks per day.
    ticks_per_day: f64,
}

impl JsonSurveyResult {
    /// Create from a summary.
    pub(super) fn from_summary(summary: &SurveySummary) -> Self {
        Self {
            summary: *summary,
            runs_per_game: summary.runs_per_game(),
            home_win_rate: summary.home_win_rate(),
            ticks_per_day: summary.ticks_per_day(),
        }
    }
}

/// Format survey results as human-readable text.
#[allow(clippy::cast_precision_loss)]
pub(super) fn format_survey_text(summary: &SurveySummary) -> String {
    let mut output = String::new();

    let _ = writeln!(
        output,
        "Survey Results ({} universes, {} games)",
        summary.universes, summary.games
    );
    output.push_str("========================================\n\n");
    let _ = writeln!(output, "Runs per game:     {:.2}", summary.runs_per_game());
    let _ = writeln!(
        output,
        "Home win rate:     {:.1}% ({} wins)",
        summary.home_win_rate() * 100.0,
        summary.home_wins
    );
    let extra_rate = if summary.games == 0 {
        0.0
    } else {
        summary.extra_innings as f64 / summary.games as f64 * 100.0
    };
    let _ = writeln!(
        output,
        "Extra innings:     {} ({extra_rate:.1}%)",
        summary.extra_innings
    );
    let _ = writeln!(output, "Ticks per day:     {:.0}", summary.ticks_per_day());

    output
}

/// Format survey results as CSV.
pub(super) fn format_survey_csv(summary: &SurveySummary) -> String {
    let mut output = String::new();

    output.push_str("universes,days,games,runs,home_wins,extra_innings,ticks,runs_per_game,home_win_rate,ticks_per_day\n");
    let _ = writeln!(
        output,
        "{},{},{},{},{},{},{},{:.4},{:.4},{:.2}",
        summary.universes,
        summary.days,
        summary.games,
        summary.runs,
        summary.home_wins,
        summary.extra_innings,
        summary.ticks,
        summary.runs_per_game(),
        summary.home_win_rate(),
        summary.ticks_per_day()
    );

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use blasebox::roster::{LeagueConfig, generate_league};
    use blasebox::{Origin, Sim};

    fn universe() -> Universe {
        let config = LeagueConfig {
            teams: 4,
            ..LeagueConfig::default()
        };
        let sim = Sim::new(1, 2, generate_league(0, &config).unwrap(), 0).unwrap();
        Universe::new(Origin::default(), sim)
    }

    #[test]
    fn test_pregame_inning() {
        let game = GameState::new("a", "b");
        assert_eq!(describe_inning(&game), "pregame");
    }

    #[test]
    fn test_scoreboard_lists_every_game() {
        let u = universe();
        let text = format_scoreboard(&u);
        assert_eq!(text.lines().count(), 1 + u.sim.state().games.len());
        assert!(text.starts_with("Day 1 (tick 0"));
    }

    #[test]
    fn test_scoreboard_names_the_days_starters() {
        let mut u = universe();
        for _ in 0..2 {
            let state = u.sim.state();
            let text = format_scoreboard(&u);
            for (game, line) in state.games.iter().zip(text.lines().skip(1)) {
                let (home, away) = game.pitchers(u.sim.roster(), state.day).unwrap();
                assert!(line.contains(&format!("| {} vs {} |", away.name, home.name)), "{line}");
            }
            u.sim.play_day().unwrap();
        }
    }

    #[test]
    fn test_json_scoreboard_names_starters() {
        let u = universe();
        let value = serde_json::to_value(JsonScoreboard::from_universe(&u)).unwrap();
        let game = &u.sim.state().games[0];
        let (home, away) = game.pitchers(u.sim.roster(), 0).unwrap();
        assert_eq!(value["games"][0]["homePitcher"], home.name.as_str());
        assert_eq!(value["games"][0]["awayPitcher"], away.name.as_str());
    }

    #[test]
    fn test_standings_rows() {
        let mut u = universe();
        u.sim.run_until_day(1).unwrap();
        let rows = standings(&u);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].wins, 1);
        assert_eq!(rows[3].losses, 1);
    }

    #[test]
    fn test_survey_csv_has_header_and_row() {
        let csv = format_survey_csv(&SurveySummary::default());
        assert_eq!(csv.lines().count(), 2);
    }
}
