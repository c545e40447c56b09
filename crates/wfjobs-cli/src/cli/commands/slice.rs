//! `wfjobs slice` – split each job of a descriptor file into parts.

use anyhow::Result;
use std::path::PathBuf;
use wfjobs_core::config::WfConfig;
use wfjobs_core::descriptor::{read_descriptors, write_descriptors};
use wfjobs_core::slicer::slice_all;

#[derive(Debug, Default)]
pub struct SliceArgs {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub parts: Option<usize>,
}

pub fn run_slice(cfg: &WfConfig, args: SliceArgs) -> Result<()> {
    let input = args.input.as_ref().unwrap_or(&cfg.paths.jobs);
    let output = args.output.as_ref().unwrap_or(&cfg.paths.sliced_jobs);
    let parts = args.parts.unwrap_or(cfg.slicer.parts).max(1);

    let folds = read_descriptors(input)?;
    let jobs = slice_all(&folds, parts)?;
    let written = write_descriptors(output, &jobs)?;
    println!("Wrote {} with {} jobs.", output.display(), written);
    Ok(())
}
