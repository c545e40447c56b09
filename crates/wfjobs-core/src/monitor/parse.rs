//! `[progress]` line parsing.
//!
//! Format (free text allowed before and after):
//! `[progress] <name> ts=<tok> fills=<int> equity=<signed decimal> window=<tok>`.
//! The name token may also be written as `name=<tok>`. Field order is fixed.

use serde::Serialize;
use std::path::Path;

use super::tail::read_tail_lines;

pub const PROGRESS_TAG: &str = "[progress]";

/// Latest known progress of one job, as reported by its worker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressRecord {
    pub name: String,
    pub ts: String,
    pub fills: u64,
    pub equity: f64,
    /// Equity exactly as written in the log.
    #[serde(skip)]
    pub equity_text: String,
    pub window: String,
}

/// Parse the first well-formed progress entry in `line`, if any.
pub fn parse_progress_line(line: &str) -> Option<ProgressRecord> {
    line.match_indices(PROGRESS_TAG)
        .find_map(|(idx, _)| parse_fields(&line[idx + PROGRESS_TAG.len()..]))
}

fn parse_fields(rest: &str) -> Option<ProgressRecord> {
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let mut tokens = rest.split_whitespace();

    let name_tok = tokens.next()?;
    let name = name_tok.strip_prefix("name=").unwrap_or(name_tok);
    if name.is_empty() {
        return None;
    }
    let ts = keyed(tokens.next()?, "ts=")?;

    let fills = keyed(tokens.next()?, "fills=")?;
    if !fills.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let fills = fills.parse::<u64>().ok()?;

    let equity_text = keyed(tokens.next()?, "equity=")?;
    if !is_signed_decimal(equity_text) {
        return None;
    }
    let equity = equity_text.parse::<f64>().ok()?;

    let window = keyed(tokens.next()?, "window=")?;

    Some(ProgressRecord {
        name: name.to_string(),
        ts: ts.to_string(),
        fills,
        equity,
        equity_text: equity_text.to_string(),
        window: window.to_string(),
    })
}

fn keyed<'a>(token: &'a str, key: &str) -> Option<&'a str> {
    token.strip_prefix(key).filter(|v| !v.is_empty())
}

fn is_signed_decimal(s: &str) -> bool {
    let body = s.strip_prefix('-').unwrap_or(s);
    !body.is_empty() && body.bytes().all(|b| b.is_ascii_digit() || b == b'.')
}

/// Most recent progress record in `lines` (scanned bottom-up).
pub fn last_progress<S: AsRef<str>>(lines: &[S]) -> Option<ProgressRecord> {
    lines
        .iter()
        .rev()
        .find_map(|l| parse_progress_line(l.as_ref()))
}

/// Latest progress record within the trailing `tail_lines` of `path`.
/// Unreadable or missing files yield `None`.
pub fn read_last_progress(path: &Path, tail_lines: usize) -> Option<ProgressRecord> {
    match read_tail_lines(path, tail_lines) {
        Ok(lines) => last_progress(&lines),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "skipping unreadable log");
            None
        }
    }
}
