//! One polling cycle: enumerate logs, apply the staleness filter, keep the
//! latest record per job name.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use super::parse::{read_last_progress, ProgressRecord};
use crate::config::MonitorConfig;

/// Job name -> latest record. Ordered so rendering is sorted by name.
pub type Snapshot = BTreeMap<String, ProgressRecord>;

pub const MIN_TAIL_LINES: usize = 10;
pub const MIN_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct MonitorOptions {
    pub log_dir: PathBuf,
    pub interval: Duration,
    pub tail_lines: usize,
    /// Logs not modified within this window are left out of the snapshot.
    pub max_age: Option<Duration>,
    pub file_prefix: String,
    pub file_suffix: String,
}

impl MonitorOptions {
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self::from_config(&MonitorConfig::default(), log_dir)
    }

    /// Options from the `[monitor]` config section. Invalid or negative
    /// durations fall back to the floor (interval) or to "no filter" (max age).
    pub fn from_config(cfg: &MonitorConfig, log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
            interval: Duration::try_from_secs_f64(cfg.interval_secs).unwrap_or(MIN_INTERVAL),
            tail_lines: cfg.tail_lines,
            max_age: cfg
                .max_age_secs
                .and_then(|s| Duration::try_from_secs_f64(s).ok()),
            file_prefix: cfg.file_prefix.clone(),
            file_suffix: cfg.file_suffix.clone(),
        }
        .with_floors()
    }

    /// Enforce the minimum interval and tail length.
    pub fn with_floors(mut self) -> Self {
        self.interval = self.interval.max(MIN_INTERVAL);
        self.tail_lines = self.tail_lines.max(MIN_TAIL_LINES);
        self
    }

    fn matches(&self, file_name: &str) -> bool {
        file_name.len() >= self.file_prefix.len() + self.file_suffix.len()
            && file_name.starts_with(&self.file_prefix)
            && file_name.ends_with(&self.file_suffix)
    }
}

/// Log files in `opts.log_dir` matching `<prefix>*<suffix>`, sorted by path.
/// A directory that cannot be listed yields no files.
pub fn list_log_files(opts: &MonitorOptions) -> Vec<PathBuf> {
    let entries = match fs::read_dir(&opts.log_dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(dir = %opts.log_dir.display(), error = %e, "cannot list log directory");
            return Vec::new();
        }
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_str().is_some_and(|n| opts.matches(n)))
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    files
}

fn is_stale(path: &Path, max_age: Duration, now: SystemTime) -> std::io::Result<bool> {
    let modified = fs::metadata(path)?.modified()?;
    // An mtime in the future (clock skew) counts as fresh.
    let age = now.duration_since(modified).unwrap_or(Duration::ZERO);
    Ok(age > max_age)
}

/// Build a fresh snapshot as of `now`.
///
/// Files are processed in path order; if two logs report the same job name
/// the later one wins. Records are keyed by the parsed name, not the file name.
pub fn collect_status(opts: &MonitorOptions, now: SystemTime) -> Snapshot {
    let mut snapshot = Snapshot::new();
    for path in list_log_files(opts) {
        if let Some(max_age) = opts.max_age {
            match is_stale(&path, max_age, now) {
                Ok(false) => {}
                Ok(true) => {
                    tracing::trace!(path = %path.display(), "skipping stale log");
                    continue;
                }
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "cannot stat log");
                    continue;
                }
            }
        }
        if let Some(record) = read_last_progress(&path, opts.tail_lines) {
            snapshot.insert(record.name.clone(), record);
        }
    }
    snapshot
}
