//! `wfjobs run` – launch one job through the backtest engine.

use anyhow::{bail, Result};
use std::path::PathBuf;
use wfjobs_core::config::WfConfig;
use wfjobs_core::descriptor::find_job;
use wfjobs_core::folds::Fold;
use wfjobs_core::runner;

#[derive(Debug, Default)]
pub struct JobArgs {
    pub name: Option<String>,
    /// Positional `(start_ts, end_ts, trade_start_ts)`.
    pub bounds: (Option<i64>, Option<i64>, Option<i64>),
    pub job: Option<String>,
    pub jobs_file: Option<PathBuf>,
    pub ticks: Option<PathBuf>,
}

/// Resolve the job to run from either the positional descriptor or `--job`.
pub fn resolve_job(cfg: &WfConfig, args: &JobArgs) -> Result<Fold> {
    if let Some(name) = &args.job {
        let file = args.jobs_file.as_ref().unwrap_or(&cfg.paths.sliced_jobs);
        return find_job(file, name);
    }
    match (&args.name, args.bounds) {
        (Some(name), (Some(test_start), Some(test_end), Some(trade_start))) => Ok(Fold {
            name: name.clone(),
            test_start,
            test_end,
            trade_start,
        }),
        _ => bail!("expected <NAME> <START_TS> <END_TS> <TRADE_START_TS> or --job <NAME>"),
    }
}

/// Returns the engine's exit code.
pub fn run_job(cfg: &WfConfig, args: JobArgs) -> Result<i32> {
    let job = resolve_job(cfg, &args)?;
    let ticks = args.ticks.as_ref().unwrap_or(&cfg.paths.ticks);
    runner::run_job(&cfg.engine, &job, ticks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_positional_descriptor() {
        let args = JobArgs {
            name: Some("fold_01".into()),
            bounds: (Some(0), Some(299), Some(8)),
            ..JobArgs::default()
        };
        let job = resolve_job(&WfConfig::default(), &args).unwrap();
        assert_eq!(job.name, "fold_01");
        assert_eq!((job.test_start, job.test_end, job.trade_start), (0, 299, 8));
    }

    #[test]
    fn resolves_job_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("sliced.tsv");
        std::fs::write(&file, "fold_01_p1\t0\t99\t8\nfold_01_p2\t100\t199\t100\n").unwrap();
        let args = JobArgs {
            job: Some("fold_01_p2".into()),
            jobs_file: Some(file),
            ..JobArgs::default()
        };
        let job = resolve_job(&WfConfig::default(), &args).unwrap();
        assert_eq!(job.test_start, 100);
    }

    #[test]
    fn incomplete_descriptor_is_rejected() {
        let args = JobArgs {
            name: Some("fold_01".into()),
            bounds: (Some(0), None, None),
            ..JobArgs::default()
        };
        assert!(resolve_job(&WfConfig::default(), &args).is_err());
    }
}
