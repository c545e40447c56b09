//! Fake worker logs: a few lines of engine chatter around `[progress]` entries.

use std::fs;
use std::path::{Path, PathBuf};

pub fn progress_line(name: &str, ts: u64, fills: u64, equity: f64, window: &str) -> String {
    format!("INFO engine [progress] {name} ts={ts} fills={fills} equity={equity:.2} window={window}")
}

/// Write a log named `file` into `dir` containing `RUN` chatter followed by `lines`.
pub fn write_log(dir: &Path, file: &str, lines: &[String]) -> PathBuf {
    let path = dir.join(file);
    let mut body = String::from("RUN job 0 0 0\nRunning: engine --grid /tmp/grid.yaml\n");
    for line in lines {
        body.push_str(line);
        body.push('\n');
    }
    fs::write(&path, body).unwrap();
    path
}
