//! Snapshot rendering.

use serde::Serialize;

use super::collect::Snapshot;
use super::parse::ProgressRecord;

pub const NO_DATA_MESSAGE: &str = "No progress entries yet.";

const HEADERS: [&str; 5] = ["Fold", "Timestamp", "Fills", "Equity", "Window"];
const COLUMN_GAP: &str = "  ";

fn row(record: &ProgressRecord) -> [String; 5] {
    [
        record.name.clone(),
        record.ts.clone(),
        record.fills.to_string(),
        record.equity_text.clone(),
        record.window.clone(),
    ]
}

/// Fixed-column table sorted by job name. Each column is as wide as its
/// widest cell (header included); columns are left-aligned.
pub fn render_table(snapshot: &Snapshot) -> String {
    if snapshot.is_empty() {
        return NO_DATA_MESSAGE.to_string();
    }

    let mut rows: Vec<[String; 5]> = Vec::with_capacity(snapshot.len() + 1);
    rows.push(HEADERS.map(String::from));
    rows.extend(snapshot.values().map(row));

    let mut widths = [0usize; 5];
    for r in &rows {
        for (w, cell) in widths.iter_mut().zip(r.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    rows.iter()
        .map(|r| {
            let line = r
                .iter()
                .zip(widths.iter())
                .map(|(cell, &w)| format!("{cell:<w$}"))
                .collect::<Vec<_>>()
                .join(COLUMN_GAP);
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Serialize)]
struct JsonFrame<'a> {
    timestamp: &'a str,
    jobs: Vec<&'a ProgressRecord>,
}

/// One-line JSON frame: `{"timestamp": ..., "jobs": [...]}` with jobs sorted by name.
pub fn render_json(snapshot: &Snapshot, timestamp: &str) -> serde_json::Result<String> {
    serde_json::to_string(&JsonFrame {
        timestamp,
        jobs: snapshot.values().collect(),
    })
}
