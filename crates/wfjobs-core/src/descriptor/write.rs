use anyhow::{Context, Result};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::folds::Fold;

pub fn format_line(job: &Fold) -> String {
    format!(
        "{}\t{}\t{}\t{}",
        job.name, job.test_start, job.test_end, job.trade_start
    )
}

/// Write `jobs` to `path`, creating parent directories as needed.
/// Returns the number of jobs written.
pub fn write_descriptors(path: &Path, jobs: &[Fold]) -> Result<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create dir: {}", parent.display()))?;
    }
    let file = fs::File::create(path)
        .with_context(|| format!("create job descriptors: {}", path.display()))?;
    let mut w = BufWriter::new(file);
    for job in jobs {
        writeln!(w, "{}", format_line(job))
            .with_context(|| format!("write job descriptors: {}", path.display()))?;
    }
    w.flush()
        .with_context(|| format!("flush job descriptors: {}", path.display()))?;
    tracing::info!(path = %path.display(), jobs = jobs.len(), "wrote job descriptors");
    Ok(jobs.len())
}
