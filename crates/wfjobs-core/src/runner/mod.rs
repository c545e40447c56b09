//! Single-job runner.
//!
//! Hands one job descriptor to the external backtest engine: writes a
//! one-scenario YAML grid, launches the engine once, and reports its exit
//! code. The engine writes `[progress]` lines that the monitor picks up.

mod grid;
mod launch;

pub use grid::{write_grid, Scenario, ScenarioGrid, ScenarioParams};
pub use launch::{build_command, run_job, SINGLE_THREAD_VARS};
