use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

use super::grid::write_grid;
use crate::config::EngineConfig;
use crate::folds::Fold;

/// Numeric-library thread pools, pinned to one thread per job unless the
/// caller already set them. Jobs run side by side, one process each.
pub const SINGLE_THREAD_VARS: [&str; 5] = [
    "OMP_NUM_THREADS",
    "OPENBLAS_NUM_THREADS",
    "MKL_NUM_THREADS",
    "NUMEXPR_NUM_THREADS",
    "VECLIB_MAXIMUM_THREADS",
];

/// Engine invocation for one job: configured args, then
/// `--ticks <ticks> --grid <grid> --settings <settings> --progress-sec <n>`.
pub fn build_command(engine: &EngineConfig, ticks: &Path, grid: &Path) -> Command {
    let mut cmd = Command::new(&engine.program);
    cmd.args(&engine.args)
        .arg("--ticks")
        .arg(ticks)
        .arg("--grid")
        .arg(grid)
        .arg("--settings")
        .arg(&engine.settings)
        .arg("--progress-sec")
        .arg(engine.progress_secs.to_string());

    if let Some(dir) = &engine.working_dir {
        cmd.current_dir(dir);
    }
    if let Some(runs) = &engine.runs_dir {
        cmd.env("RUNS_DIR", runs);
    }
    if engine.single_thread {
        for var in SINGLE_THREAD_VARS {
            if std::env::var_os(var).is_none() {
                cmd.env(var, "1");
            }
        }
    }
    cmd.envs(&engine.env);
    cmd
}

/// Run `job` through the engine and wait for it. Returns the engine's exit
/// code (1 if it was killed by a signal).
pub fn run_job(engine: &EngineConfig, job: &Fold, ticks: &Path) -> Result<i32> {
    println!(
        "RUN {} {} {} {}",
        job.name, job.test_start, job.test_end, job.trade_start
    );
    let grid = write_grid(job)?;
    let mut cmd = build_command(engine, ticks, grid.path());
    tracing::info!(job = %job.name, command = ?cmd, "launching engine");

    let status = cmd
        .status()
        .with_context(|| format!("launch engine: {}", engine.program))?;
    let code = status.code().unwrap_or_else(|| {
        tracing::warn!(job = %job.name, "engine terminated by signal");
        1
    });
    tracing::info!(job = %job.name, code, "engine exited");
    Ok(code)
}
