//! Progress monitor for running walk-forward jobs.
//!
//! Each job appends `[progress] ...` lines to its own log file. The monitor
//! periodically scans the log directory, reads a bounded tail of every log,
//! keeps the most recent progress record per job name and renders a table.
//! Logs are written concurrently by other processes, so a missing, truncated
//! or unreadable file is never an error: it simply contributes nothing.

mod collect;
mod error;
mod parse;
mod render;
mod run;
mod tail;

pub use collect::{
    collect_status, list_log_files, MonitorOptions, Snapshot, MIN_INTERVAL, MIN_TAIL_LINES,
};
pub use error::MonitorError;
pub use parse::{
    last_progress, parse_progress_line, read_last_progress, ProgressRecord, PROGRESS_TAG,
};
pub use render::{render_json, render_table, NO_DATA_MESSAGE};
pub use run::{shutdown_on_ctrl_c, LoopOptions, OutputFormat, ProgressMonitor};
pub use tail::{read_tail_lines, tail_window_bytes, TAIL_BLOCK_BYTES};
