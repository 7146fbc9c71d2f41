//! Input loading and report output.
//!
//! Every function here fails hard: a missing or malformed input file aborts
//! the run.

use std::path::{Path, PathBuf};

use crate::baseline::{BaselineIndex, ClusterProfile};
use crate::persona::{AnalysisSet, RawAnalyses};
use crate::report::MetricReport;
use crate::utilities::{FileHandler, Result};

/// Read the baseline profile array.
pub fn load_baseline(path: impl AsRef<Path>) -> Result<Vec<ClusterProfile>> {
    let path = path.as_ref();
    let profiles: Vec<ClusterProfile> = FileHandler::default().load(path)?;
    tracing::info!(path = %path.display(), clusters = profiles.len(), "loaded baseline profiles");
    Ok(profiles)
}

/// Read the baseline and build its index.
pub fn load_baseline_index(path: impl AsRef<Path>) -> Result<BaselineIndex> {
    let index = BaselineIndex::build(load_baseline(path)?)?;
    if index.is_empty() {
        tracing::warn!("baseline has no profiles; every cluster will be skipped");
    } else {
        tracing::debug!(clusters = index.len(), "baseline index built");
    }
    Ok(index)
}

/// Read and validate the persona analyses.
pub fn load_analyses(path: impl AsRef<Path>) -> Result<AnalysisSet> {
    let path = path.as_ref();
    let raw: RawAnalyses = FileHandler::default().load(path)?;
    let set = AnalysisSet::from_raw(raw)?;
    tracing::info!(path = %path.display(), clusters = set.len(), "loaded persona analyses");
    Ok(set)
}

/// Write the report as pretty-printed JSON.
pub fn write_report(path: impl AsRef<Path>, report: &MetricReport) -> Result<PathBuf> {
    let written = FileHandler::default().save(path, report)?;
    tracing::info!(path = %written.display(), "report written");
    Ok(written)
}
