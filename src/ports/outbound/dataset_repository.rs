use crate::shared::Result;
use crate::study::domain::{ResultRow, Timepoint};
use crate::study::services::ComparisonTable;
use serde::Serialize;
use std::path::PathBuf;

/// Provenance of one consolidation run
#[derive(Debug, Clone, Serialize)]
pub struct Provenance {
    pub tool: String,
    pub tool_version: String,
    pub run_id: String,
    pub generated_utc: String,
    /// Timepoint file stems (`t0`..`t3`) that were merged
    pub inputs_present: Vec<String>,
    pub outputs: ProvenanceOutputs,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProvenanceOutputs {
    pub merged_all_csv: String,
    pub comparativa_csv: String,
}

/// DatasetRepository port for the tabular study dataset
///
/// Per-timepoint tables are append-only: a run starts a fresh table for its
/// timepoint and appends one row per image. Tables of other timepoints are
/// never touched.
pub trait DatasetRepository {
    /// Replaces the table of `timepoint` with a header-only table
    ///
    /// # Returns
    /// Path of the table
    fn begin_timepoint(&self, timepoint: Timepoint) -> Result<PathBuf>;

    /// Appends `row` to the table of its timepoint, creating it with a header if missing
    fn append_row(&self, row: &ResultRow) -> Result<()>;

    /// Reads the table of `timepoint`
    ///
    /// # Returns
    /// `None` when the timepoint has never been scanned
    ///
    /// # Errors
    /// Returns an error if the table exists but is not a valid result table
    fn read_timepoint(&self, timepoint: Timepoint) -> Result<Option<Vec<ResultRow>>>;

    /// Writes the consolidated table
    fn write_merged(&self, rows: &[ResultRow]) -> Result<PathBuf>;

    /// Writes the per-image comparison table
    fn write_comparison(&self, table: &ComparisonTable) -> Result<PathBuf>;

    /// Writes the provenance record of a consolidation run
    fn write_provenance(&self, provenance: &Provenance) -> Result<PathBuf>;

    /// Where `merged` and `comparison` tables are written, for provenance
    fn output_paths(&self) -> ProvenanceOutputs;

    /// Location of the table of `timepoint`, whether or not it exists yet
    fn timepoint_path(&self, timepoint: Timepoint) -> PathBuf;

    /// Directory holding the per-timepoint tables
    fn tables_dir(&self) -> PathBuf;
}
