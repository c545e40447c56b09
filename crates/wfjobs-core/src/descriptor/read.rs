use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::error::DescriptorError;
use crate::folds::Fold;

/// Parse one descriptor line. `line_no` is 1-based and only used for errors.
pub fn parse_line(line: &str, line_no: usize) -> Result<Fold, DescriptorError> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != 4 {
        return Err(DescriptorError::FieldCount {
            line: line_no,
            found: fields.len(),
        });
    }
    let name = fields[0].trim();
    if name.is_empty() {
        return Err(DescriptorError::EmptyName { line: line_no });
    }
    let ts = |idx: usize, field: &'static str| -> Result<i64, DescriptorError> {
        let raw = fields[idx].trim();
        raw.parse::<i64>().map_err(|_| DescriptorError::BadTimestamp {
            line: line_no,
            field,
            value: raw.to_string(),
        })
    };
    Ok(Fold {
        name: name.to_string(),
        test_start: ts(1, "test_start")?,
        test_end: ts(2, "test_end")?,
        trade_start: ts(3, "trade_start")?,
    })
}

/// Parse a whole descriptor document; blank lines are ignored.
pub fn parse_descriptors(text: &str) -> Result<Vec<Fold>, DescriptorError> {
    text.lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(i, l)| parse_line(l.trim_end_matches('\r'), i + 1))
        .collect()
}

pub fn read_descriptors(path: &Path) -> Result<Vec<Fold>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read job descriptors: {}", path.display()))?;
    let jobs = parse_descriptors(&text)
        .with_context(|| format!("parse job descriptors: {}", path.display()))?;
    Ok(jobs)
}

/// Look up a single job by name in a descriptor file.
pub fn find_job(path: &Path, name: &str) -> Result<Fold> {
    read_descriptors(path)?
        .into_iter()
        .find(|j| j.name == name)
        .ok_or_else(|| anyhow::anyhow!("job {name:?} not found in {}", path.display()))
}
