//! Errors for fold planning.

use thiserror::Error;

/// Invalid input to [`super::build_folds`]. Raised before any fold is produced.
#[derive(Debug, Error, PartialEq)]
pub enum FoldError {
    #[error("invalid time range: last_ts {last_ts} is before first_ts {first_ts}")]
    InvalidRange { first_ts: f64, last_ts: f64 },
    #[error("time range bounds must be finite (first_ts {first_ts}, last_ts {last_ts})")]
    NonFiniteRange { first_ts: f64, last_ts: f64 },
    #[error("fold count must be at least 1")]
    InvalidFoldCount,
    #[error("embargo must be a finite, non-negative number of days (got {0})")]
    InvalidEmbargo(f64),
}
