use crate::study::domain::Timepoint;
use std::path::PathBuf;

/// An image left out of a timepoint under the skip policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedImage {
    /// `repo:tag`
    pub image: String,
    pub reason: String,
}

/// ScanResponse - Outcome of one scan-at-timepoint run
#[derive(Debug, Clone)]
pub struct ScanResponse {
    pub timepoint: Timepoint,
    pub table_path: PathBuf,
    pub rows_written: usize,
    pub skipped: Vec<SkippedImage>,
}

impl ScanResponse {
    /// Whether every tracked image produced a row
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}
