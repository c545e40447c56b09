//! `wfjobs gen-folds` – plan walk-forward folds and write the job file.

use anyhow::Result;
use std::path::PathBuf;
use wfjobs_core::config::WfConfig;
use wfjobs_core::descriptor::write_descriptors;
use wfjobs_core::folds::build_folds;
use wfjobs_core::ticks::probe_range;

#[derive(Debug, Default)]
pub struct GenFoldsArgs {
    pub ticks: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub folds: Option<usize>,
    pub embargo_days: Option<f64>,
    /// Explicit `(first_ts, last_ts)`; when absent the tick file is probed.
    pub range: Option<(f64, f64)>,
}

pub fn run_gen_folds(cfg: &WfConfig, args: GenFoldsArgs) -> Result<()> {
    let fold_count = args.folds.unwrap_or(cfg.folds.count);
    let embargo_days = args.embargo_days.unwrap_or(cfg.folds.embargo_days);
    let (first_ts, last_ts) = match args.range {
        Some(range) => range,
        None => {
            let ticks = args.ticks.as_ref().unwrap_or(&cfg.paths.ticks);
            let range = probe_range(ticks, &cfg.ticks)?;
            (range.first_ts, range.last_ts)
        }
    };

    let folds = build_folds(first_ts, last_ts, fold_count, embargo_days)?;
    let output = args.output.as_ref().unwrap_or(&cfg.paths.jobs);
    write_descriptors(output, &folds)?;
    println!("Wrote {}", output.display());
    Ok(())
}
