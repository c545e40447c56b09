//! Walk-forward fold planning.
//!
//! Cuts a global time range into contiguous, non-overlapping evaluation
//! folds, each with an embargoed trade start. Output is deterministic so
//! that re-running with the same inputs reproduces the same fold names,
//! which downstream logs are keyed by.

mod build;
mod error;
mod types;

pub use build::{build_folds, fold_name, SECONDS_PER_DAY};
pub use error::FoldError;
pub use types::Fold;
