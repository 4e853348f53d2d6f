use super::atomic::replace_file;
use crate::ports::outbound::{DatasetRepository, Provenance, ProvenanceOutputs};
use crate::shared::error::PipelineError;
use crate::shared::security::{read_input_file, validate_output_path};
use crate::shared::Result;
use crate::study::domain::{ResultRecord, ResultRow, Timepoint, RESULT_COLUMNS};
use crate::study::services::ComparisonTable;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const TABLES_DIR: &str = "csv";
const MERGED_FILE: &str = "merged_all.csv";
const COMPARISON_FILE: &str = "comparativa.csv";
const PROVENANCE_FILE: &str = "analysis_provenance.json";

/// CsvDatasetRepository adapter storing the study dataset as CSV under `<data_dir>/csv`
///
/// Layout:
/// - `resultados_<tp>.csv` per timepoint
/// - `merged_all.csv`, `comparativa.csv` and `analysis_provenance.json`
///   produced by consolidation
pub struct CsvDatasetRepository {
    tables_dir: PathBuf,
}

impl CsvDatasetRepository {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            tables_dir: data_dir.join(TABLES_DIR),
        }
    }

    fn merged_path(&self) -> PathBuf {
        self.tables_dir.join(MERGED_FILE)
    }

    fn comparison_path(&self) -> PathBuf {
        self.tables_dir.join(COMPARISON_FILE)
    }

    fn write_error(path: &Path, error: impl ToString) -> PipelineError {
        PipelineError::FileWriteError {
            path: path.to_path_buf(),
            details: error.to_string(),
        }
    }

    fn validation_error(path: &Path, details: String) -> anyhow::Error {
        PipelineError::DatasetValidation {
            path: path.to_path_buf(),
            details,
        }
        .into()
    }

    fn write_rows(path: &Path, rows: &[ResultRow]) -> Result<()> {
        replace_file(path, |file| {
            let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
            writer.write_record(RESULT_COLUMNS).map_err(io::Error::from)?;
            for row in rows {
                writer.serialize(row.to_record()).map_err(io::Error::from)?;
            }
            writer.flush()
        })
    }
}

impl DatasetRepository for CsvDatasetRepository {
    fn begin_timepoint(&self, timepoint: Timepoint) -> Result<PathBuf> {
        let path = self.timepoint_path(timepoint);
        Self::write_rows(&path, &[])?;
        log::debug!("Reset {} to a header-only table", path.display());
        Ok(path)
    }

    fn append_row(&self, row: &ResultRow) -> Result<()> {
        let path = self.timepoint_path(row.timepoint);
        validate_output_path(&path)?;
        fs::create_dir_all(&self.tables_dir).map_err(|e| Self::write_error(&path, e))?;

        let needs_header = fs::metadata(&path).map(|m| m.len() == 0).unwrap_or(true);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| Self::write_error(&path, e))?;

        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        if needs_header {
            writer
                .write_record(RESULT_COLUMNS)
                .map_err(|e| Self::write_error(&path, e))?;
        }
        writer
            .serialize(row.to_record())
            .map_err(|e| Self::write_error(&path, e))?;
        writer.flush().map_err(|e| Self::write_error(&path, e))?;
        Ok(())
    }

    fn read_timepoint(&self, timepoint: Timepoint) -> Result<Option<Vec<ResultRow>>> {
        let path = self.timepoint_path(timepoint);
        if fs::symlink_metadata(&path).is_err() {
            return Ok(None);
        }

        let content = read_input_file(&path)?;
        let mut reader = ReaderBuilder::new().from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| Self::validation_error(&path, e.to_string()))?
            .clone();
        if !headers.iter().eq(RESULT_COLUMNS.iter().copied()) {
            return Err(Self::validation_error(
                &path,
                format!(
                    "Unexpected header: {} (expected {})",
                    headers.iter().collect::<Vec<_>>().join(","),
                    RESULT_COLUMNS.join(",")
                ),
            ));
        }

        let mut rows = Vec::new();
        for (index, record) in reader.deserialize::<ResultRecord>().enumerate() {
            let row_number = index + 1;
            let record = record
                .map_err(|e| Self::validation_error(&path, format!("Row {}: {}", row_number, e)))?;
            let row = record
                .into_row()
                .map_err(|e| Self::validation_error(&path, format!("Row {}: {}", row_number, e)))?;
            rows.push(row);
        }

        Ok(Some(rows))
    }

    fn write_merged(&self, rows: &[ResultRow]) -> Result<PathBuf> {
        let path = self.merged_path();
        Self::write_rows(&path, rows)?;
        Ok(path)
    }

    fn write_comparison(&self, table: &ComparisonTable) -> Result<PathBuf> {
        let path = self.comparison_path();
        replace_file(&path, |file| {
            let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
            writer.write_record(&table.header).map_err(io::Error::from)?;
            for row in &table.rows {
                writer.write_record(row).map_err(io::Error::from)?;
            }
            writer.flush()
        })?;
        Ok(path)
    }

    fn write_provenance(&self, provenance: &Provenance) -> Result<PathBuf> {
        let path = self.tables_dir.join(PROVENANCE_FILE);
        let json = serde_json::to_string_pretty(provenance)?;
        replace_file(&path, |file| {
            file.write_all(json.as_bytes())?;
            file.write_all(b"\n")
        })?;
        Ok(path)
    }

    fn output_paths(&self) -> ProvenanceOutputs {
        ProvenanceOutputs {
            merged_all_csv: self.merged_path().display().to_string(),
            comparativa_csv: self.comparison_path().display().to_string(),
        }
    }

    fn timepoint_path(&self, timepoint: Timepoint) -> PathBuf {
        self.tables_dir
            .join(format!("resultados_{}.csv", timepoint.file_stem()))
    }

    fn tables_dir(&self) -> PathBuf {
        self.tables_dir.clone()
    }
}
