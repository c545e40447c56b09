//! CLI command handlers, one file per subcommand.

mod completions;
mod gen_folds;
mod job;
mod monitor;
mod slice;

pub use completions::run_completions;
pub use gen_folds::{run_gen_folds, GenFoldsArgs};
pub use job::{run_job, JobArgs};
pub use monitor::{run_monitor, MonitorArgs};
pub use slice::{run_slice, SliceArgs};
