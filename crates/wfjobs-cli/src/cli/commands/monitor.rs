//! `wfjobs monitor` – poll job logs and print progress snapshots until Ctrl+C.

use anyhow::{ensure, Result};
use std::path::PathBuf;
use wfjobs_core::config::WfConfig;
use wfjobs_core::monitor::{
    shutdown_on_ctrl_c, LoopOptions, MonitorOptions, OutputFormat, ProgressMonitor,
};

use crate::cli::FormatArg;

#[derive(Debug)]
pub struct MonitorArgs {
    pub dir: Option<PathBuf>,
    pub interval: Option<f64>,
    pub tail_lines: Option<usize>,
    pub max_age: Option<f64>,
    pub once: bool,
    pub format: FormatArg,
    pub clear_screen: bool,
}

/// Config `[monitor]` section with command-line overrides applied.
pub fn monitor_options(cfg: &WfConfig, args: &MonitorArgs) -> Result<MonitorOptions> {
    let mut section = cfg.monitor.clone();
    if let Some(interval) = args.interval {
        ensure!(interval.is_finite(), "--interval must be a number of seconds");
        section.interval_secs = interval;
    }
    if let Some(lines) = args.tail_lines {
        section.tail_lines = lines;
    }
    if let Some(age) = args.max_age {
        ensure!(
            age.is_finite() && age >= 0.0,
            "--max-age must be a non-negative number of seconds"
        );
        section.max_age_secs = Some(age);
    }
    let dir = args.dir.clone().unwrap_or_else(|| cfg.paths.log_dir.clone());
    Ok(MonitorOptions::from_config(&section, dir))
}

pub async fn run_monitor(cfg: &WfConfig, args: MonitorArgs) -> Result<()> {
    let opts = monitor_options(cfg, &args)?;
    let mut monitor = ProgressMonitor::new(opts)?;
    let loop_opts = LoopOptions {
        format: match args.format {
            FormatArg::Table => OutputFormat::Table,
            FormatArg::Json => OutputFormat::Json,
        },
        clear_screen: args.clear_screen && args.format == FormatArg::Table,
        once: args.once,
    };

    let shutdown = shutdown_on_ctrl_c();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    monitor.run(&mut out, loop_opts, shutdown).await?;
    Ok(())
}
