use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// Fold planning parameters (`[folds]` in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoldsConfig {
    /// Number of walk-forward folds to cut the tick range into.
    pub count: usize,
    /// Embargo between a fold's test start and its trade start, in days.
    pub embargo_days: f64,
}

impl Default for FoldsConfig {
    fn default() -> Self {
        Self {
            count: 6,
            embargo_days: 1.0,
        }
    }
}

/// File locations shared by the subcommands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Tick CSV used to probe the global time range and passed to the engine.
    pub ticks: PathBuf,
    /// Job descriptor file written by `gen-folds`.
    pub jobs: PathBuf,
    /// Job descriptor file written by `slice`.
    pub sliced_jobs: PathBuf,
    /// Directory holding one progress log per job.
    pub log_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            ticks: PathBuf::from("ticks_all.csv"),
            jobs: PathBuf::from("wf_jobs.tsv"),
            sliced_jobs: PathBuf::from("wf_jobs_sliced.tsv"),
            log_dir: PathBuf::from("logs"),
        }
    }
}

/// Unit of the first column of the tick CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampUnit {
    #[default]
    Ms,
    S,
}

impl TimestampUnit {
    /// Convert a raw column value into epoch seconds.
    pub fn to_seconds(self, raw: i64) -> f64 {
        match self {
            TimestampUnit::Ms => raw as f64 / 1000.0,
            TimestampUnit::S => raw as f64,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicksConfig {
    pub timestamp_unit: TimestampUnit,
    /// Whether the first line of the tick CSV is a header row.
    pub has_header: bool,
}

impl Default for TicksConfig {
    fn default() -> Self {
        Self {
            timestamp_unit: TimestampUnit::Ms,
            has_header: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlicerConfig {
    /// Slices per fold.
    pub parts: usize,
}

impl Default for SlicerConfig {
    fn default() -> Self {
        Self { parts: 3 }
    }
}

/// Progress monitor defaults (`[monitor]`); CLI flags win over these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Seconds between refreshes.
    pub interval_secs: f64,
    /// Max number of trailing lines examined per log.
    pub tail_lines: usize,
    /// Only include logs modified within the last N seconds (None = include all).
    #[serde(default)]
    pub max_age_secs: Option<f64>,
    /// Log file name prefix, e.g. `wf_fold_`.
    pub file_prefix: String,
    /// Log file name suffix, e.g. `.log`.
    pub file_suffix: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_secs: 10.0,
            tail_lines: 200,
            max_age_secs: None,
            file_prefix: "wf_fold_".to_string(),
            file_suffix: ".log".to_string(),
        }
    }
}

/// How the backtest engine is launched for a single job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Program to execute (looked up on PATH if not absolute).
    pub program: String,
    /// Arguments placed before the generated `--ticks/--grid/...` flags.
    #[serde(default)]
    pub args: Vec<String>,
    /// Settings file forwarded as `--settings`.
    pub settings: PathBuf,
    /// Forwarded as `--progress-sec`; controls how often the engine logs `[progress]`.
    pub progress_secs: u64,
    /// Exported to the engine as `RUNS_DIR`.
    #[serde(default)]
    pub runs_dir: Option<PathBuf>,
    /// Working directory for the engine process.
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
    /// Extra environment variables for the engine process.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    /// Default numeric-library thread counts to 1 unless already set.
    pub single_thread: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            program: "python3".to_string(),
            args: vec![
                "-u".to_string(),
                "-m".to_string(),
                "backtest.engine".to_string(),
            ],
            settings: PathBuf::from("config/app.yaml"),
            progress_secs: 10,
            runs_dir: None,
            working_dir: None,
            env: BTreeMap::new(),
            single_thread: true,
        }
    }
}

/// Global configuration loaded from `~/.config/wfjobs/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WfConfig {
    #[serde(default)]
    pub folds: FoldsConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub ticks: TicksConfig,
    #[serde(default)]
    pub slicer: SlicerConfig,
    #[serde(default)]
    pub monitor: MonitorConfig,
    #[serde(default)]
    pub engine: EngineConfig,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("wfjobs")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<WfConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = WfConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: WfConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = WfConfig::default();
        assert_eq!(cfg.folds.count, 6);
        assert_eq!(cfg.slicer.parts, 3);
        assert_eq!(cfg.monitor.tail_lines, 200);
        assert!((cfg.monitor.interval_secs - 10.0).abs() < 1e-9);
        assert!(cfg.monitor.max_age_secs.is_none());
        assert_eq!(cfg.paths.log_dir, PathBuf::from("logs"));
        assert_eq!(cfg.ticks.timestamp_unit, TimestampUnit::Ms);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = WfConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: WfConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.folds.count, cfg.folds.count);
        assert_eq!(parsed.monitor.file_prefix, cfg.monitor.file_prefix);
        assert_eq!(parsed.engine.args, cfg.engine.args);
    }

    #[test]
    fn config_toml_partial_sections_fall_back_to_defaults() {
        let toml = r#"
            [folds]
            count = 12
            embargo_days = 0.5

            [monitor]
            interval_secs = 2.5
            tail_lines = 50
            max_age_secs = 600.0
            file_prefix = "job_"
            file_suffix = ".out"
        "#;
        let cfg: WfConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.folds.count, 12);
        assert!((cfg.folds.embargo_days - 0.5).abs() < 1e-9);
        assert_eq!(cfg.monitor.max_age_secs, Some(600.0));
        assert_eq!(cfg.monitor.file_prefix, "job_");
        assert_eq!(cfg.slicer.parts, 3);
        assert_eq!(cfg.engine.progress_secs, 10);
    }

    #[test]
    fn config_toml_engine_and_units() {
        let toml = r#"
            [ticks]
            timestamp_unit = "s"
            has_header = false

            [engine]
            program = "/opt/engine/bin/bt"
            settings = "/etc/bt.yaml"
            progress_secs = 30
            single_thread = false

            [engine.env]
            PYTHONPATH = "/srv/bot"
        "#;
        let cfg: WfConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.ticks.timestamp_unit, TimestampUnit::S);
        assert!(!cfg.ticks.has_header);
        assert_eq!(cfg.engine.program, "/opt/engine/bin/bt");
        assert!(cfg.engine.args.is_empty());
        assert_eq!(cfg.engine.env.get("PYTHONPATH").map(String::as_str), Some("/srv/bot"));
        assert!(!cfg.engine.single_thread);
    }

    #[test]
    fn timestamp_unit_conversion() {
        assert!((TimestampUnit::Ms.to_seconds(1_500) - 1.5).abs() < 1e-9);
        assert!((TimestampUnit::S.to_seconds(42) - 42.0).abs() < 1e-9);
    }
}
