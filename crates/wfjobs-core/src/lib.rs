//! wfjobs core: walk-forward fold planning, job slicing, progress monitoring
//! and the single-job engine runner.

pub mod config;
pub mod logging;

pub mod descriptor;
pub mod folds;
pub mod monitor;
pub mod runner;
pub mod slicer;
pub mod ticks;
