//! Blasebox CLI - create, advance, and inspect simulated league universes.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Blasebox - A deterministic baseball league simulator
#[derive(Parser, Debug)]
#[command(name = "blasebox")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a universe file from a roster or a generated league
    New {
        /// Universe file to write
        #[arg(required = true)]
        out: PathBuf,

        /// Roster JSON file (`{"players": [..], "teams": [..]}`)
        #[arg(short, long, conflicts_with = "teams")]
        roster: Option<PathBuf>,

        /// Teams in a generated league (default: 20)
        #[arg(short, long)]
        teams: Option<usize>,

        /// Seed for the generated league's names (default: 0)
        #[arg(long, default_value = "0")]
        league_seed: u64,

        /// First generator seed (default: clock)
        #[arg(long)]
        seed0: Option<u64>,

        /// Second generator seed (default: clock)
        #[arg(long)]
        seed1: Option<u64>,

        /// Start time in epoch milliseconds (default: now)
        #[arg(long)]
        start: Option<i64>,

        /// Season the universe branched from
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        season: i32,

        /// Day the universe branched from
        #[arg(long, default_value = "0")]
        day: i32,

        /// Milliseconds into the branch day
        #[arg(long, default_value = "0")]
        offset: i64,
    },

    /// Advance a universe and save it back
    Run {
        /// Universe file
        #[arg(required = true)]
        universe: PathBuf,

        /// Run until this simulated time, epoch ms (default: now)
        #[arg(short, long, conflicts_with = "ticks")]
        until: Option<i64>,

        /// Run exactly this many ticks
        #[arg(short, long)]
        ticks: Option<u64>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Suppress the scoreboard
        #[arg(short, long)]
        quiet: bool,
    },

    /// Keep a universe in step with the wall clock, printing plays
    Follow {
        /// Universe file
        #[arg(required = true)]
        universe: PathBuf,

        /// Checkpoint directory (default: the universe file's directory)
        #[arg(long)]
        store: Option<PathBuf>,

        /// Minimum seconds between checkpoints (default: 60)
        #[arg(long, default_value = "60")]
        checkpoint_secs: u64,

        /// Stop after this many ticks
        #[arg(long)]
        max_ticks: Option<u64>,
    },

    /// Print win/loss records
    Standings {
        /// Universe file
        #[arg(required = true)]
        universe: PathBuf,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Run many independent universes in parallel and aggregate statistics
    Survey {
        /// Number of universes (default: 100)
        #[arg(short, long, default_value = "100")]
        universes: u64,

        /// Days per universe (default: 9)
        #[arg(short, long, default_value = "9")]
        days: u64,

        /// Teams in the generated league (default: 20)
        #[arg(short, long, default_value = "20")]
        teams: usize,

        /// Base seed (default: clock)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::SurveyFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match args.command {
        Commands::New {
            out,
            roster,
            teams,
            league_seed,
            seed0,
            seed1,
            start,
            season,
            day,
            offset,
        } => cli::new::execute(&cli::new::NewOptions {
            out,
            roster,
            teams,
            league_seed,
            seed0,
            seed1,
            start,
            origin: blasebox::Origin {
                season,
                day,
                offset,
            },
        }),

        Commands::Run {
            universe,
            until,
            ticks,
            format,
            quiet,
        } => cli::run::execute(&universe, until, ticks, format, quiet),

        Commands::Follow {
            universe,
            store,
            checkpoint_secs,
            max_ticks,
        } => cli::follow::execute(&universe, store, checkpoint_secs, max_ticks),

        Commands::Standings { universe, format } => cli::standings::execute(&universe, format),

        Commands::Survey {
            universes,
            days,
            teams,
            seed,
            threads,
            format,
            progress,
        } => cli::survey::execute(universes, days, teams, seed, threads, format, progress),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
