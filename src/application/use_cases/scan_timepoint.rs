use super::{image_step_failed, utc_now};
use crate::application::dto::{ScanRequest, ScanResponse, SkippedImage};
use crate::ports::outbound::{
    ContainerEngine, DatasetRepository, ProgressReporter, ReportArchive, VulnerabilityScanner,
};
use crate::shared::error::PipelineError;
use crate::shared::Result;
use crate::study::domain::{
    ImageReference, ImageSize, ResultRow, ScanReport, ScannerInfo, SeverityFilter, Timepoint,
    TrackedImage,
};
use crate::study::policies::FailureAction;
use crate::study::services::{ImageResolver, ReportAggregator};

/// ScanTimepointUseCase - Measures every tracked image at one timepoint
///
/// For each image in order: resolve, pull, scan, archive the raw report,
/// aggregate and append one row. The timepoint's table is reset first, so
/// re-running a timepoint replaces its rows and leaves other timepoints alone.
///
/// # Type Parameters
/// * `CE` - ContainerEngine implementation
/// * `VS` - VulnerabilityScanner implementation
/// * `DR` - DatasetRepository implementation
/// * `RA` - ReportArchive implementation
/// * `PR` - ProgressReporter implementation
pub struct ScanTimepointUseCase<CE, VS, DR, RA, PR> {
    container_engine: CE,
    scanner: VS,
    dataset: DR,
    archive: RA,
    progress_reporter: PR,
}

impl<CE, VS, DR, RA, PR> ScanTimepointUseCase<CE, VS, DR, RA, PR>
where
    CE: ContainerEngine,
    VS: VulnerabilityScanner,
    DR: DatasetRepository,
    RA: ReportArchive,
    PR: ProgressReporter,
{
    pub fn new(container_engine: CE, scanner: VS, dataset: DR, archive: RA, progress_reporter: PR) -> Self {
        Self {
            container_engine,
            scanner,
            dataset,
            archive,
            progress_reporter,
        }
    }

    /// Executes one timepoint run
    ///
    /// # Errors
    /// - clashing report names, an unknown registry host or a failing version
    ///   report stop the run before the table is touched
    /// - a per-image failure stops the run under the fail-fast policy
    /// - archive and table I/O failures always stop the run
    pub fn execute(&self, request: ScanRequest) -> Result<ScanResponse> {
        let timepoint = request.timepoint;
        if let Some((first, second)) = TrackedImage::find_report_name_clash(&request.images) {
            anyhow::bail!(PipelineError::Validation {
                message: format!(
                    "{} and {} would overwrite each other's raw report {}",
                    first.display_name(),
                    second.display_name(),
                    first.report_name(timepoint)
                ),
            });
        }
        let resolved = ImageResolver::resolve_all(&request.images, request.registry.login_server())?;

        // One scanner version per run: the database does not change mid-run
        let scanner_info = self.read_scanner_info()?;

        let table_path = self.dataset.begin_timepoint(timepoint)?;
        self.progress_reporter.report(&format!(
            "🔎 Scanning {} image(s) at {} (severities: {})",
            resolved.len(),
            timepoint,
            request.severities.to_argument()
        ));

        let total = resolved.len();
        let mut rows_written = 0;
        let mut skipped = Vec::new();

        for (index, (image, reference)) in resolved.iter().enumerate() {
            self.progress_reporter.report_progress(
                index,
                total,
                Some(&format!("{} at {}", image.display_name(), timepoint)),
            );

            match self.measure(timepoint, image, reference, &request.severities, &scanner_info) {
                Ok(row) => {
                    self.dataset.append_row(&row)?;
                    rows_written += 1;
                    self.progress_reporter.report(&format!(
                        "✅ {}: {} critical, {} high, {} MB, density {}",
                        image.display_name(),
                        row.counts.critical,
                        row.counts.high,
                        row.size,
                        row.density
                    ));
                }
                Err(error) if is_image_failure(&error) => {
                    match request.failure_policy.on_image_failure() {
                        FailureAction::Abort => return Err(error),
                        FailureAction::Continue => {
                            log::warn!("Skipping {} at {}: {:#}", image.display_name(), timepoint, error);
                            self.progress_reporter.report_error(&format!(
                                "⚠️  Warning: skipping {} at {}: {}",
                                image.display_name(),
                                timepoint,
                                error
                            ));
                            skipped.push(SkippedImage {
                                image: image.display_name(),
                                reason: error.to_string(),
                            });
                        }
                    }
                }
                Err(error) => return Err(error),
            }
        }

        self.progress_reporter.report_completion(&format!(
            "{}: {} row(s) written to {}{}",
            timepoint,
            rows_written,
            table_path.display(),
            if skipped.is_empty() {
                String::new()
            } else {
                format!(" ({} image(s) skipped)", skipped.len())
            }
        ));

        Ok(ScanResponse {
            timepoint,
            table_path,
            rows_written,
            skipped,
        })
    }

    fn read_scanner_info(&self) -> Result<ScannerInfo> {
        let report = self.scanner.version_report()?;
        let info = ScannerInfo::parse(&report);
        log::debug!(
            "Scanner version {} (database updated {})",
            info.version(),
            info.db_updated_at().unwrap_or("unknown")
        );
        Ok(info)
    }

    /// Produces the row of one image; step failures come back as
    /// [`PipelineError::ImageStepFailed`].
    fn measure(
        &self,
        timepoint: Timepoint,
        image: &TrackedImage,
        reference: &ImageReference,
        severities: &SeverityFilter,
        scanner_info: &ScannerInfo,
    ) -> Result<ResultRow> {
        let stage = format!("{} scan", timepoint);

        let size_bytes = self
            .container_engine
            .pull(reference)
            .map_err(|e| image_step_failed(image, &stage, "Pull", e))?;

        let scan_utc = utc_now();
        let raw = self
            .scanner
            .scan(reference, severities)
            .map_err(|e| image_step_failed(image, &stage, "Scan", e))?;
        if raw.trim().is_empty() {
            let empty = PipelineError::EmptyScanOutput {
                image: reference.to_string(),
            };
            return Err(image_step_failed(image, &stage, "Scan", empty.into()));
        }

        let archived = self.archive.store(&image.report_name(timepoint), &raw)?;
        log::debug!("Archived raw report at {}", archived.display());

        let report =
            ScanReport::parse(&raw).map_err(|e| image_step_failed(image, &stage, "Report parsing", e))?;
        let size = ImageSize::from_bytes(size_bytes);
        let findings = ReportAggregator::aggregate(&report, size);

        Ok(ResultRow::new(
            timepoint,
            image,
            reference.to_string(),
            size,
            findings,
            scanner_info,
            scan_utc,
        ))
    }
}

fn is_image_failure(error: &anyhow::Error) -> bool {
    matches!(
        error.downcast_ref::<PipelineError>(),
        Some(PipelineError::ImageStepFailed { .. })
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::{Provenance, ProvenanceOutputs};
    use crate::study::domain::RegistryConfig;
    use crate::study::policies::FailurePolicy;
    use crate::study::services::ComparisonTable;
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    const REPORT: &str = r#"{"SchemaVersion": 2, "Results": [{"Target": "os", "Vulnerabilities": [
        {"VulnerabilityID": "CVE-1", "Severity": "CRITICAL"},
        {"VulnerabilityID": "CVE-2", "Severity": "HIGH"}]}]}"#;

    struct FakeEngine {
        failing: Option<&'static str>,
    }

    impl ContainerEngine for FakeEngine {
        fn pull(&self, reference: &ImageReference) -> Result<u64> {
            if Some(reference.short_name()) == self.failing {
                anyhow::bail!("manifest unknown");
            }
            Ok(10 * 1024 * 1024)
        }
        fn tag(&self, _source: &ImageReference, _target: &ImageReference) -> Result<()> {
            Ok(())
        }
        fn push(&self, _reference: &ImageReference) -> Result<()> {
            Ok(())
        }
    }

    struct FakeScanner {
        output: &'static str,
    }

    impl VulnerabilityScanner for FakeScanner {
        fn scan(&self, _reference: &ImageReference, _severities: &SeverityFilter) -> Result<String> {
            Ok(self.output.to_string())
        }
        fn version_report(&self) -> Result<String> {
            Ok("Version: 0.50.1\nVulnerability DB:\n  Version: 2\n  UpdatedAt: 2024-04-10 12:11:00 +0000 UTC\n".to_string())
        }
    }

    #[derive(Default)]
    struct MemoryDataset {
        tables: RefCell<BTreeMap<Timepoint, Vec<ResultRow>>>,
    }

    impl DatasetRepository for MemoryDataset {
        fn begin_timepoint(&self, timepoint: Timepoint) -> Result<PathBuf> {
            self.tables.borrow_mut().insert(timepoint, Vec::new());
            Ok(self.timepoint_path(timepoint))
        }
        fn append_row(&self, row: &ResultRow) -> Result<()> {
            self.tables
                .borrow_mut()
                .entry(row.timepoint)
                .or_default()
                .push(row.clone());
            Ok(())
        }
        fn read_timepoint(&self, timepoint: Timepoint) -> Result<Option<Vec<ResultRow>>> {
            Ok(self.tables.borrow().get(&timepoint).cloned())
        }
        fn write_merged(&self, _rows: &[ResultRow]) -> Result<PathBuf> {
            Ok(PathBuf::from("merged_all.csv"))
        }
        fn write_comparison(&self, _table: &ComparisonTable) -> Result<PathBuf> {
            Ok(PathBuf::from("comparativa.csv"))
        }
        fn write_provenance(&self, _provenance: &Provenance) -> Result<PathBuf> {
            Ok(PathBuf::from("analysis_provenance.json"))
        }
        fn output_paths(&self) -> ProvenanceOutputs {
            ProvenanceOutputs {
                merged_all_csv: "merged_all.csv".to_string(),
                comparativa_csv: "comparativa.csv".to_string(),
            }
        }
        fn timepoint_path(&self, timepoint: Timepoint) -> PathBuf {
            PathBuf::from(format!("resultados_{}.csv", timepoint.file_stem()))
        }
        fn tables_dir(&self) -> PathBuf {
            PathBuf::from(".")
        }
    }

    #[derive(Default)]
    struct MemoryArchive {
        names: RefCell<Vec<String>>,
    }

    impl ReportArchive for MemoryArchive {
        fn store(&self, name: &str, _content: &str) -> Result<PathBuf> {
            self.names.borrow_mut().push(name.to_string());
            Ok(PathBuf::from(format!("{}.json", name)))
        }
    }

    struct SilentReporter;

    impl ProgressReporter for SilentReporter {
        fn report(&self, _message: &str) {}
        fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}
        fn report_error(&self, _message: &str) {}
        fn report_completion(&self, _message: &str) {}
    }

    type TestUseCase =
        ScanTimepointUseCase<FakeEngine, FakeScanner, MemoryDataset, MemoryArchive, SilentReporter>;

    fn use_case(failing: Option<&'static str>, output: &'static str) -> TestUseCase {
        ScanTimepointUseCase::new(
            FakeEngine { failing },
            FakeScanner { output },
            MemoryDataset::default(),
            MemoryArchive::default(),
            SilentReporter,
        )
    }

    fn request(policy: FailurePolicy) -> ScanRequest {
        ScanRequest::new(
            Timepoint::T2,
            TrackedImage::default_set(),
            RegistryConfig::new("studyacr".to_string(), "studyacr.azurecr.io".to_string()).unwrap(),
            SeverityFilter::default(),
            policy,
        )
    }

    #[test]
    fn test_scan_all_images() {
        let use_case = use_case(None, REPORT);
        let response = use_case.execute(request(FailurePolicy::Skip)).unwrap();

        assert_eq!(response.rows_written, 4);
        assert!(response.is_complete());
        let tables = use_case.dataset.tables.borrow();
        let rows = &tables[&Timepoint::T2];
        assert_eq!(rows[0].image_ref, "studyacr.azurecr.io/alpine:3.19");
        assert_eq!(rows[0].density.to_string(), "0.2000");
        assert_eq!(rows[0].trivy_version, "0.50.1");
        assert_eq!(
            rows[0].trivy_db_updated_at.as_deref(),
            Some("2024-04-10 12:11:00 +0000 UTC")
        );
        assert_eq!(
            *use_case.archive.names.borrow(),
            vec!["alpine_3.19_t2", "busybox_1.36_t2", "debian_12-slim_t2", "nginx_1.25_t2"]
        );
    }

    #[test]
    fn test_skip_policy_leaves_failed_image_out() {
        let use_case = use_case(Some("busybox"), REPORT);
        let response = use_case.execute(request(FailurePolicy::Skip)).unwrap();

        assert_eq!(response.rows_written, 3);
        assert_eq!(response.skipped.len(), 1);
        assert_eq!(response.skipped[0].image, "busybox:1.36");
        assert!(response.skipped[0].reason.contains("Pull failed"));
    }

    #[test]
    fn test_fail_fast_stops_at_first_failure() {
        let use_case = use_case(Some("busybox"), REPORT);
        let err = use_case.execute(request(FailurePolicy::FailFast)).unwrap_err();

        assert!(err.to_string().contains("Pull failed for busybox:1.36 during T2 scan"));
        let tables = use_case.dataset.tables.borrow();
        let repos: Vec<&str> = tables[&Timepoint::T2].iter().map(|r| r.repo.as_str()).collect();
        assert_eq!(repos, vec!["alpine"]);
    }

    #[test]
    fn test_empty_output_is_a_scan_failure() {
        let use_case = use_case(None, "  \n");
        let response = use_case.execute(request(FailurePolicy::Skip)).unwrap();
        assert_eq!(response.rows_written, 0);
        assert_eq!(response.skipped.len(), 4);
        assert!(response.skipped[0].reason.starts_with("Scan failed"));
        assert!(use_case.archive.names.borrow().is_empty());
    }

    #[test]
    fn test_unparseable_report_is_archived_then_skipped() {
        let use_case = use_case(None, "not json");
        let response = use_case.execute(request(FailurePolicy::Skip)).unwrap();
        assert_eq!(response.rows_written, 0);
        assert_eq!(use_case.archive.names.borrow().len(), 4);
        assert!(response.skipped[0].reason.starts_with("Report parsing failed"));
    }

    #[test]
    fn test_report_name_clash_leaves_table_untouched() {
        let use_case = use_case(None, REPORT);
        let mut request = request(FailurePolicy::Skip);
        request.images = vec![
            TrackedImage::new(
                "docker.io/library/alpine:3.19".to_string(),
                "base/alpine".to_string(),
                "3.19".to_string(),
            )
            .unwrap(),
            TrackedImage::new(
                "docker.io/library/alpine:3.19".to_string(),
                "base-alpine".to_string(),
                "3.19".to_string(),
            )
            .unwrap(),
        ];

        let err = use_case.execute(request).unwrap_err();
        assert!(err.to_string().contains("base-alpine_3.19_t2"));
        assert!(use_case.dataset.tables.borrow().is_empty());
        assert!(use_case.archive.names.borrow().is_empty());
    }
}
