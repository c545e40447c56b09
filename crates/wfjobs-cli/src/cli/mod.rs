//! CLI for wfjobs.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use wfjobs_core::config;

use commands::{
    run_completions, run_gen_folds, run_job, run_monitor, run_slice, GenFoldsArgs, JobArgs,
    MonitorArgs, SliceArgs,
};

/// Top-level CLI for walk-forward job planning and monitoring.
#[derive(Debug, Parser)]
#[command(name = "wfjobs")]
#[command(about = "Plan, slice, launch and monitor walk-forward backtest jobs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Snapshot output format for `monitor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FormatArg {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Cut the tick range into walk-forward folds and write the job file.
    GenFolds {
        /// Tick CSV to probe for the time range (default: paths.ticks).
        #[arg(long)]
        ticks: Option<PathBuf>,
        /// Job descriptor file to write (default: paths.jobs).
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Number of folds (default: folds.count).
        #[arg(long, value_name = "N")]
        folds: Option<usize>,
        /// Embargo in days between test start and trade start (default: folds.embargo_days).
        #[arg(long, value_name = "DAYS")]
        embargo_days: Option<f64>,
        /// First timestamp in epoch seconds; skips probing the tick file.
        #[arg(long, requires = "last_ts", allow_negative_numbers = true)]
        first_ts: Option<f64>,
        /// Last timestamp in epoch seconds; skips probing the tick file.
        #[arg(long, requires = "first_ts", allow_negative_numbers = true)]
        last_ts: Option<f64>,
    },

    /// Split every job of a descriptor file into smaller jobs.
    Slice {
        /// Input job descriptor file (default: paths.jobs).
        #[arg(long, short)]
        input: Option<PathBuf>,
        /// Output job descriptor file (default: paths.sliced_jobs).
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Slices per fold (default: slicer.parts; values below 1 are raised to 1).
        #[arg(long, value_name = "N")]
        parts: Option<usize>,
    },

    /// Continuously print the latest progress of every job log.
    Monitor {
        /// Directory containing the job logs (default: paths.log_dir).
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Seconds between refreshes (minimum 1).
        #[arg(long, value_name = "SECS")]
        interval: Option<f64>,
        /// Max number of lines to examine from the end of each log (minimum 10).
        #[arg(long, value_name = "N")]
        tail_lines: Option<usize>,
        /// Only include logs updated within the last N seconds.
        #[arg(long, value_name = "SECS")]
        max_age: Option<f64>,
        /// Print one snapshot and exit.
        #[arg(long)]
        once: bool,
        /// Snapshot format.
        #[arg(long, value_enum, default_value_t = FormatArg::Table)]
        format: FormatArg,
        /// Don't clear the screen between snapshots.
        #[arg(long)]
        no_clear: bool,
    },

    /// Run a single job through the backtest engine.
    Run {
        /// Job name.
        name: Option<String>,
        /// Inclusive start timestamp.
        start_ts: Option<i64>,
        /// Inclusive end timestamp.
        end_ts: Option<i64>,
        /// Trading start timestamp.
        trade_start_ts: Option<i64>,
        /// Look the job up by name in a descriptor file instead.
        #[arg(long, conflicts_with = "name", value_name = "NAME")]
        job: Option<String>,
        /// Descriptor file used with --job (default: paths.sliced_jobs).
        #[arg(long, requires = "job")]
        jobs_file: Option<PathBuf>,
        /// Tick CSV handed to the engine (default: paths.ticks).
        #[arg(long)]
        ticks: Option<PathBuf>,
    },

    /// Print shell completions.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl CliCommand {
    /// Dispatch; returns the process exit code.
    pub async fn run_from_args() -> Result<i32> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::GenFolds {
                ticks,
                output,
                folds,
                embargo_days,
                first_ts,
                last_ts,
            } => {
                let args = GenFoldsArgs {
                    ticks,
                    output,
                    folds,
                    embargo_days,
                    range: first_ts.zip(last_ts),
                };
                run_gen_folds(&cfg, args)?;
            }
            CliCommand::Slice {
                input,
                output,
                parts,
            } => run_slice(&cfg, SliceArgs { input, output, parts })?,
            CliCommand::Monitor {
                dir,
                interval,
                tail_lines,
                max_age,
                once,
                format,
                no_clear,
            } => {
                let args = MonitorArgs {
                    dir,
                    interval,
                    tail_lines,
                    max_age,
                    once,
                    format,
                    clear_screen: !no_clear,
                };
                run_monitor(&cfg, args).await?;
            }
            CliCommand::Run {
                name,
                start_ts,
                end_ts,
                trade_start_ts,
                job,
                jobs_file,
                ticks,
            } => {
                let args = JobArgs {
                    name,
                    bounds: (start_ts, end_ts, trade_start_ts),
                    job,
                    jobs_file,
                    ticks,
                };
                return run_job(&cfg, args);
            }
            CliCommand::Completions { shell } => run_completions(shell),
        }

        Ok(0)
    }
}

#[cfg(test)]
mod tests;
