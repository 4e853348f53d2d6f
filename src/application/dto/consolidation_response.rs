use crate::study::domain::Timepoint;
use std::path::PathBuf;

/// ConsolidationResponse - Files produced by a consolidation run
#[derive(Debug, Clone)]
pub struct ConsolidationResponse {
    /// Timepoints whose tables were found and merged
    pub inputs_present: Vec<Timepoint>,
    pub rows_merged: usize,
    /// Number of distinct (image, tag, repo) rows in the comparison
    pub images_compared: usize,
    pub merged_path: PathBuf,
    pub comparison_path: PathBuf,
    pub provenance_path: PathBuf,
}
