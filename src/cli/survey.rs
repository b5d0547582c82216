//! Survey command implementation.

use super::output::{JsonSurveyResult, format_survey_csv, format_survey_text};
use super::{CliError, SurveyFormat, clock_seed};
use blasebox::roster::{LeagueConfig, generate_league};
use blasebox::survey::{SurveyConfig, SurveySummary, survey_universe, universe_seeds};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::time::Instant;

/// Execute the survey command.
///
/// # Errors
///
/// Returns an error if the league cannot be generated or scheduled.
pub(crate) fn execute(
    universes: u64,
    days: u64,
    teams: usize,
    seed: Option<u64>,
    threads: Option<usize>,
    format: SurveyFormat,
    progress: bool,
) -> Result<(), CliError> {
    let config = SurveyConfig {
        days,
        league: LeagueConfig {
            teams,
            ..LeagueConfig::default()
        },
    };

    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = seed.unwrap_or_else(clock_seed);
    let roster = generate_league(base_seed, &config.league)?;

    let pb = if progress {
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} universes ({per_sec})")
            .map_err(|e| CliError::new(format!("progress template: {e}")))?
            .progress_chars("=>-");
        let pb = ProgressBar::new(universes);
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();

    // Each thread folds into its own summary; summaries merge at the end.
    let summary = (0..universes)
        .into_par_iter()
        .map(|i| {
            let result = survey_universe(&roster, universe_seeds(base_seed, i), config.days);
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            result
        })
        .try_fold(SurveySummary::default, |mut acc, result| {
            acc.merge(&result?);
            Ok::<_, blasebox::SimError>(acc)
        })
        .try_reduce(SurveySummary::default, |mut a, b| {
            a.merge(&b);
            Ok(a)
        })?;

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();

    match format {
        SurveyFormat::Text => {
            println!();
            print!("{}", format_survey_text(&summary));
            println!();
            println!("Duration: {:.2}s", duration.as_secs_f64());
        }
        SurveyFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonSurveyResult::from_summary(&summary))?;
            println!("{json}");
        }
        SurveyFormat::Csv => {
            print!("{}", format_survey_csv(&summary));
        }
    }

    Ok(())
}
