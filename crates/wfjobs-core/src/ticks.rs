//! Tick file time-range probe.
//!
//! The fold planner only needs the first and last timestamp of the tick
//! CSV, so instead of streaming every row this reads the first data row and
//! a bounded tail of the file. The timestamp is the first comma-separated
//! column of each row.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

use crate::config::TicksConfig;
use crate::monitor::read_tail_lines;

/// Trailing lines examined when looking for the last row.
const TAIL_ROWS: usize = 16;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TickRangeError {
    #[error("no ticks found in {0}")]
    Empty(String),
    #[error("{row} row of {path} has no integer timestamp: {value:?}")]
    BadTimestamp {
        path: String,
        row: &'static str,
        value: String,
    },
}

/// First and last tick timestamps, in epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickRange {
    pub first_ts: f64,
    pub last_ts: f64,
}

fn row_timestamp(path: &Path, row: &'static str, line: &str) -> Result<i64, TickRangeError> {
    let raw = line.split(',').next().unwrap_or("").trim();
    raw.parse::<i64>().map_err(|_| TickRangeError::BadTimestamp {
        path: path.display().to_string(),
        row,
        value: raw.to_string(),
    })
}

fn first_data_row(path: &Path, has_header: bool) -> Result<Option<String>> {
    let file = File::open(path).with_context(|| format!("open ticks: {}", path.display()))?;
    let skip = usize::from(has_header);
    for line in BufReader::new(file).lines().skip(skip) {
        let line = line.with_context(|| format!("read ticks: {}", path.display()))?;
        if !line.trim().is_empty() {
            return Ok(Some(line));
        }
    }
    Ok(None)
}

/// Probe the tick file at `path` for its time range.
pub fn probe_range(path: &Path, cfg: &TicksConfig) -> Result<TickRange> {
    let empty = || TickRangeError::Empty(path.display().to_string());

    let first_line = first_data_row(path, cfg.has_header)?.ok_or_else(empty)?;
    let first = row_timestamp(path, "first", &first_line)?;

    let tail = read_tail_lines(path, TAIL_ROWS)
        .with_context(|| format!("read tail of ticks: {}", path.display()))?;
    let last_line = tail
        .iter()
        .rev()
        .find(|l| !l.trim().is_empty())
        .ok_or_else(empty)?;
    let last = row_timestamp(path, "last", last_line)?;

    let range = TickRange {
        first_ts: cfg.timestamp_unit.to_seconds(first),
        last_ts: cfg.timestamp_unit.to_seconds(last),
    };
    tracing::info!(
        path = %path.display(),
        first_ts = range.first_ts,
        last_ts = range.last_ts,
        "probed tick range"
    );
    Ok(range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimestampUnit;
    use std::io::Write;

    fn ticks(body: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(body.as_bytes()).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn millisecond_ticks_with_header() {
        let f = ticks("ts,price,qty\n1700000000000,1.0,2\n1700000000500,1.1,1\n1700000900000,1.2,3\n\n");
        let range = probe_range(f.path(), &TicksConfig::default()).unwrap();
        assert!((range.first_ts - 1_700_000_000.0).abs() < 1e-6);
        assert!((range.last_ts - 1_700_000_900.0).abs() < 1e-6);
    }

    #[test]
    fn second_ticks_without_header() {
        let f = ticks("100,1\n250,2\n900,3");
        let cfg = TicksConfig {
            timestamp_unit: TimestampUnit::S,
            has_header: false,
        };
        let range = probe_range(f.path(), &cfg).unwrap();
        assert_eq!(range, TickRange { first_ts: 100.0, last_ts: 900.0 });
    }

    #[test]
    fn header_only_is_empty() {
        let f = ticks("ts,price\n");
        let err = probe_range(f.path(), &TicksConfig::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TickRangeError>(),
            Some(TickRangeError::Empty(_))
        ));
    }

    #[test]
    fn non_numeric_timestamp_is_reported() {
        let f = ticks("ts,price\nabc,1\n");
        let err = probe_range(f.path(), &TicksConfig::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TickRangeError>(),
            Some(TickRangeError::BadTimestamp { row: "first", .. })
        ));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(probe_range(&dir.path().join("ticks.csv"), &TicksConfig::default()).is_err());
    }
}
