use std::path::PathBuf;
use thiserror::Error;

/// Startup failures. Once polling has begun the monitor never fails.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("log directory not found: {0}")]
    LogDirMissing(PathBuf),
    #[error("log path is not a directory: {0}")]
    NotADirectory(PathBuf),
}
