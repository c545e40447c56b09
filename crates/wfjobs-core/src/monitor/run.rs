//! The polling loop.
//!
//! Single task: scan, render, sleep. Shutdown is only observed between
//! cycles, so reads started in a cycle always finish.

use anyhow::{Context, Result};
use std::io::Write;
use std::time::{Duration, SystemTime};
use tokio::sync::watch;

use super::collect::{collect_status, MonitorOptions, Snapshot};
use super::error::MonitorError;
use super::render::{render_json, render_table};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    /// One JSON object per cycle.
    Json,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LoopOptions {
    pub format: OutputFormat,
    pub clear_screen: bool,
    /// Stop after the first cycle.
    pub once: bool,
}

/// Holds the latest name -> record mapping; rebuilt from scratch every poll.
pub struct ProgressMonitor {
    opts: MonitorOptions,
    snapshot: Snapshot,
}

impl ProgressMonitor {
    /// Fails if the log directory does not exist; nothing after this point does.
    pub fn new(opts: MonitorOptions) -> Result<Self, MonitorError> {
        let opts = opts.with_floors();
        if !opts.log_dir.exists() {
            return Err(MonitorError::LogDirMissing(opts.log_dir));
        }
        if !opts.log_dir.is_dir() {
            return Err(MonitorError::NotADirectory(opts.log_dir));
        }
        Ok(Self {
            opts,
            snapshot: Snapshot::new(),
        })
    }

    pub fn options(&self) -> &MonitorOptions {
        &self.opts
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn poll(&mut self) -> &Snapshot {
        self.poll_at(SystemTime::now())
    }

    /// Poll with an explicit "now" for the staleness filter.
    pub fn poll_at(&mut self, now: SystemTime) -> &Snapshot {
        self.snapshot = collect_status(&self.opts, now);
        &self.snapshot
    }

    fn write_frame<W: Write>(&self, out: &mut W, loop_opts: &LoopOptions) -> Result<()> {
        let stamp = chrono::Local::now().format(STAMP_FORMAT).to_string();
        match loop_opts.format {
            OutputFormat::Table => {
                if loop_opts.clear_screen {
                    write!(out, "{CLEAR_SCREEN}")?;
                }
                writeln!(
                    out,
                    "{} (refresh every {:.1}s)",
                    stamp,
                    self.opts.interval.as_secs_f64()
                )?;
                writeln!(out, "{}", render_table(&self.snapshot))?;
            }
            OutputFormat::Json => {
                let json = render_json(&self.snapshot, &stamp).context("serialize snapshot")?;
                writeln!(out, "{json}")?;
            }
        }
        out.flush()?;
        Ok(())
    }

    /// Poll and print until `shutdown` flips to `true` (or once, if asked).
    /// Returns the number of completed cycles.
    pub async fn run<W: Write>(
        &mut self,
        out: &mut W,
        loop_opts: LoopOptions,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<u64> {
        tracing::info!(
            dir = %self.opts.log_dir.display(),
            interval_secs = self.opts.interval.as_secs_f64(),
            tail_lines = self.opts.tail_lines,
            max_age_secs = self.opts.max_age.map(|d| d.as_secs_f64()),
            "progress monitor started"
        );
        let mut cycles = 0u64;
        loop {
            let stop = *shutdown.borrow();
            if stop {
                break;
            }
            self.poll();
            self.write_frame(out, &loop_opts)
                .context("write monitor snapshot")?;
            cycles += 1;
            tracing::debug!(cycle = cycles, jobs = self.snapshot.len(), "monitor cycle");

            if loop_opts.once || sleep_or_shutdown(self.opts.interval, &mut shutdown).await {
                break;
            }
        }
        tracing::info!(cycles, "progress monitor stopped");
        Ok(cycles)
    }
}

/// Sleeps for `interval`; returns true if shutdown was requested meanwhile.
async fn sleep_or_shutdown(interval: Duration, shutdown: &mut watch::Receiver<bool>) -> bool {
    let sleep = tokio::time::sleep(interval);
    tokio::pin!(sleep);
    loop {
        tokio::select! {
            _ = &mut sleep => return false,
            changed = shutdown.changed() => match changed {
                Ok(()) if *shutdown.borrow() => return true,
                Ok(()) => {}
                Err(_) => {
                    // Sender gone: nobody can request shutdown any more.
                    (&mut sleep).await;
                    return false;
                }
            },
        }
    }
}

/// Spawns a task that flips the returned flag on the first Ctrl+C.
/// Must be called from within a Tokio runtime.
pub fn shutdown_on_ctrl_c() -> watch::Receiver<bool> {
    let (tx, rx) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Ctrl+C received, stopping monitor");
                let _ = tx.send(true);
            }
            Err(e) => {
                tracing::warn!(error = %e, "cannot listen for Ctrl+C");
                // Keep the sender alive so the loop keeps its normal cadence.
                std::future::pending::<()>().await;
            }
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn opts_for(dir: &std::path::Path) -> MonitorOptions {
        MonitorOptions::new(dir)
    }

    #[test]
    fn missing_dir_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = ProgressMonitor::new(opts_for(&dir.path().join("logs"))).err().unwrap();
        assert!(matches!(err, MonitorError::LogDirMissing(_)));
    }

    #[test]
    fn file_instead_of_dir_is_fatal() {
        let f = tempfile::NamedTempFile::new().unwrap();
        let err = ProgressMonitor::new(opts_for(f.path())).err().unwrap();
        assert!(matches!(err, MonitorError::NotADirectory(_)));
    }

    #[test]
    fn poll_rebuilds_snapshot_each_time() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("wf_fold_a.log");
        fs::write(&log, "[progress] job_a ts=1 fills=1 equity=1 window=w\n").unwrap();
        let mut mon = ProgressMonitor::new(opts_for(dir.path())).unwrap();
        assert_eq!(mon.poll().len(), 1);

        fs::remove_file(&log).unwrap();
        assert!(mon.poll().is_empty());
    }

    #[tokio::test]
    async fn once_prints_single_table_frame() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("wf_fold_b.log"),
            "[progress] job_b ts=200 fills=7 equity=99.5 window=W2\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("wf_fold_a.log"),
            "[progress] job_a ts=100 fills=5 equity=123.45 window=W1\n",
        )
        .unwrap();

        let mut mon = ProgressMonitor::new(opts_for(dir.path())).unwrap();
        let (_tx, rx) = watch::channel(false);
        let mut out = Vec::new();
        let loop_opts = LoopOptions {
            once: true,
            ..LoopOptions::default()
        };
        let cycles = mon.run(&mut out, loop_opts, rx).await.unwrap();
        assert_eq!(cycles, 1);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].ends_with("(refresh every 10.0s)"));
        assert!(lines[1].starts_with("Fold"));
        assert!(lines[2].starts_with("job_a"));
        assert!(lines[3].starts_with("job_b"));
        assert_eq!(lines.len(), 4);
    }

    #[tokio::test]
    async fn empty_dir_prints_no_data_message() {
        let dir = tempfile::tempdir().unwrap();
        let mut mon = ProgressMonitor::new(opts_for(dir.path())).unwrap();
        let (_tx, rx) = watch::channel(false);
        let mut out = Vec::new();
        let loop_opts = LoopOptions {
            once: true,
            ..LoopOptions::default()
        };
        mon.run(&mut out, loop_opts, rx).await.unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(crate::monitor::NO_DATA_MESSAGE));
    }

    #[tokio::test]
    async fn shutdown_interrupts_sleep_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = opts_for(dir.path());
        opts.interval = Duration::from_secs(30);
        let mut mon = ProgressMonitor::new(opts).unwrap();

        let (tx, rx) = watch::channel(false);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            let _ = tx.send(true);
        });

        let mut out = Vec::new();
        let started = std::time::Instant::now();
        let loop_opts = LoopOptions {
            format: OutputFormat::Json,
            ..LoopOptions::default()
        };
        let cycles = mon.run(&mut out, loop_opts, rx).await.unwrap();
        assert_eq!(cycles, 1);
        assert!(started.elapsed() < Duration::from_secs(10));

        let text = String::from_utf8(out).unwrap();
        let frame: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
        assert!(frame["jobs"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn already_cancelled_runs_no_cycles() {
        let dir = tempfile::tempdir().unwrap();
        let mut mon = ProgressMonitor::new(opts_for(dir.path())).unwrap();
        let (_tx, rx) = watch::channel(true);
        let mut out = Vec::new();
        let cycles = mon.run(&mut out, LoopOptions::default(), rx).await.unwrap();
        assert_eq!(cycles, 0);
        assert!(out.is_empty());
    }
}
