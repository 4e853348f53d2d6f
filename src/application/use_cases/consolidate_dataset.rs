use super::utc_now;
use crate::application::dto::ConsolidationResponse;
use crate::ports::outbound::{DatasetRepository, ProgressReporter, Provenance};
use crate::shared::error::PipelineError;
use crate::shared::Result;
use crate::study::domain::{ResultRow, Timepoint};
use crate::study::services::Consolidator;
use uuid::Uuid;

/// Written in place of a missing database timestamp in the merged table
const UNKNOWN_DB_TIMESTAMP: &str = "unknown";

/// ConsolidateDatasetUseCase - Merges the per-timepoint tables into the analysis dataset
///
/// Produces the merged table, the per-image comparison table and a
/// provenance record. Every run recomputes all three from the tables on disk.
pub struct ConsolidateDatasetUseCase<DR, PR> {
    dataset: DR,
    progress_reporter: PR,
}

impl<DR, PR> ConsolidateDatasetUseCase<DR, PR>
where
    DR: DatasetRepository,
    PR: ProgressReporter,
{
    pub fn new(dataset: DR, progress_reporter: PR) -> Self {
        Self {
            dataset,
            progress_reporter,
        }
    }

    /// # Errors
    /// - [`PipelineError::NoTimepointTables`] when no timepoint has been scanned
    /// - [`PipelineError::DatasetValidation`] when a table is malformed or holds
    ///   rows of another timepoint
    pub fn execute(&self) -> Result<ConsolidationResponse> {
        let tables = self.load_tables()?;
        if tables.is_empty() {
            anyhow::bail!(PipelineError::NoTimepointTables {
                dir: self.dataset.tables_dir(),
            });
        }

        let inputs_present: Vec<Timepoint> = tables.iter().map(|(tp, _)| *tp).collect();
        let mut merged = Consolidator::merge(tables);
        let comparison = Consolidator::compare(&merged);

        for row in merged.iter_mut() {
            if row.trivy_db_updated_at.is_none() {
                row.trivy_db_updated_at = Some(UNKNOWN_DB_TIMESTAMP.to_string());
            }
        }

        let merged_path = self.dataset.write_merged(&merged)?;
        self.progress_reporter.report(&format!(
            "📝 Merged {} row(s) into {}",
            merged.len(),
            merged_path.display()
        ));

        let comparison_path = self.dataset.write_comparison(&comparison)?;
        self.progress_reporter.report(&format!(
            "📊 Compared {} image(s) in {}",
            comparison.rows.len(),
            comparison_path.display()
        ));

        let provenance = Provenance {
            tool: env!("CARGO_PKG_NAME").to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            run_id: Uuid::new_v4().to_string(),
            generated_utc: utc_now(),
            inputs_present: inputs_present
                .iter()
                .map(|tp| tp.file_stem().to_string())
                .collect(),
            outputs: self.dataset.output_paths(),
        };
        let provenance_path = self.dataset.write_provenance(&provenance)?;

        self.progress_reporter.report_completion(&format!(
            "Consolidated {} timepoint(s)",
            inputs_present.len()
        ));

        Ok(ConsolidationResponse {
            inputs_present,
            rows_merged: merged.len(),
            images_compared: comparison.rows.len(),
            merged_path,
            comparison_path,
            provenance_path,
        })
    }

    fn load_tables(&self) -> Result<Vec<(Timepoint, Vec<ResultRow>)>> {
        let mut tables = Vec::new();
        for timepoint in Timepoint::ALL {
            let Some(rows) = self.dataset.read_timepoint(timepoint)? else {
                log::debug!("No table for {}", timepoint);
                continue;
            };

            if let Some((line, found)) = Consolidator::find_timepoint_mismatch(timepoint, &rows) {
                anyhow::bail!(PipelineError::DatasetValidation {
                    path: self.dataset.timepoint_path(timepoint),
                    details: format!(
                        "Row {} has timepoint {} but the file holds {}",
                        line, found, timepoint
                    ),
                });
            }

            self.progress_reporter
                .report(&format!("📖 {}: {} row(s)", timepoint, rows.len()));
            tables.push((timepoint, rows));
        }
        Ok(tables)
    }
}
