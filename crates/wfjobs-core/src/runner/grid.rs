use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use tempfile::NamedTempFile;

use crate::folds::Fold;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioParams {
    pub start_ts: i64,
    pub end_ts: i64,
    pub trade_start_ts: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub params: ScenarioParams,
}

/// Grid document understood by the engine's `--grid` flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioGrid {
    pub scenarios: Vec<Scenario>,
}

impl ScenarioGrid {
    pub fn for_job(job: &Fold) -> Self {
        Self {
            scenarios: vec![Scenario {
                name: job.name.clone(),
                params: ScenarioParams {
                    start_ts: job.test_start,
                    end_ts: job.test_end,
                    trade_start_ts: job.trade_start,
                },
            }],
        }
    }
}

/// Write the job's grid to a `.yaml` temp file. The file is removed when the
/// returned handle is dropped, so keep it alive until the engine exits.
pub fn write_grid(job: &Fold) -> Result<NamedTempFile> {
    let yaml = serde_yaml::to_string(&ScenarioGrid::for_job(job)).context("serialize scenario grid")?;
    let mut file = tempfile::Builder::new()
        .prefix("wfjobs-grid-")
        .suffix(".yaml")
        .tempfile()
        .context("create scenario grid file")?;
    file.write_all(yaml.as_bytes())
        .and_then(|_| file.flush())
        .with_context(|| format!("write scenario grid: {}", file.path().display()))?;
    Ok(file)
}
