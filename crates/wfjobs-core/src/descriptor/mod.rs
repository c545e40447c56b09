//! Job descriptor files: one job per line, tab-separated, no header.
//!
//! `name\ttest_start\ttest_end\ttrade_start`, timestamps in integer epoch
//! seconds. Written by `gen-folds` and `slice`, consumed by the runner.

mod error;
mod read;
mod write;

pub use error::DescriptorError;
pub use read::{find_job, parse_descriptors, parse_line, read_descriptors};
pub use write::{format_line, write_descriptors};
