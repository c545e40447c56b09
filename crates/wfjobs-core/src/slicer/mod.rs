//! Job slicing: splits a fold into smaller, independently executable jobs.
//!
//! Slices are contiguous and never overlap; the embargo stays local to the
//! original fold (a slice never trades before the fold's `trade_start`).

mod error;
mod slice;

pub use error::SliceError;
pub use slice::{slice_all, slice_fold, slice_name, JobSlice};
