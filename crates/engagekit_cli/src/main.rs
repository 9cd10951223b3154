//! `engagekit` command line.
//!
//! - `engagekit simulate`    : simulated multi-platform workbook
//! - `engagekit reference`   : published reference workbooks
//! - `engagekit metrics`     : Instagram metrics comparison from CSV
//! - `engagekit qualitative` : content-coding analysis from CSV

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

/// Social-media engagement simulation and reporting.
#[derive(Debug, Parser)]
#[command(name = "engagekit")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Simulate follower and engagement series, write one workbook
    Simulate {
        /// Output workbook path
        #[arg(long, default_value = engagekit_report::C_FILE_SIMULATED)]
        out: PathBuf,

        /// Seed for the random source
        #[arg(long)]
        seed: Option<u64>,

        /// Number of simulated days
        #[arg(long)]
        days: Option<usize>,

        /// Mean daily follower growth (0.001 = 0.1%)
        #[arg(long)]
        growth_rate: Option<f64>,

        /// Date of day 0 (YYYY-MM-DD)
        #[arg(long, value_parser = commands::parse_date)]
        start_date: Option<NaiveDate>,
    },

    /// Write the published reference workbooks
    Reference {
        /// Output directory
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Compare institutions from an Instagram metrics CSV
    Metrics {
        /// Instagram metrics CSV
        #[arg(long)]
        input: PathBuf,

        /// Output directory
        #[arg(long, default_value = commands::C_DIR_OUT_DEFAULT)]
        out_dir: PathBuf,

        /// Institution compared against the market leaders
        #[arg(long)]
        focus: Option<String>,
    },

    /// Analyze a content-coding CSV
    Qualitative {
        /// Content coding CSV
        #[arg(long)]
        input: PathBuf,

        /// Output directory
        #[arg(long, default_value = commands::C_DIR_OUT_DEFAULT)]
        out_dir: PathBuf,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Simulate {
            out,
            seed,
            days,
            growth_rate,
            start_date,
        } => commands::run_simulate(&out, seed, days, growth_rate, start_date),
        Commands::Reference { out_dir } => commands::run_reference(&out_dir),
        Commands::Metrics {
            input,
            out_dir,
            focus,
        } => commands::run_metrics(&input, &out_dir, focus),
        Commands::Qualitative { input, out_dir } => commands::run_qualitative(&input, &out_dir),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
