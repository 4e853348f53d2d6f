use crate::study::domain::{Density, ImageSize, ScanReport, Severity, SeverityCounts};

/// Reduces a scan report to the numbers recorded in a result row
pub struct ReportAggregator;

impl ReportAggregator {
    /// Counts CRITICAL and HIGH findings across all targets.
    ///
    /// Findings are counted per occurrence: a CVE reported for two packages
    /// counts twice. Reports without findings yield zero counts.
    pub fn count(report: &ScanReport) -> SeverityCounts {
        report
            .findings()
            .fold(SeverityCounts::default(), |mut counts, finding| {
                match finding.severity() {
                    Some(Severity::Critical) => counts.critical += 1,
                    Some(Severity::High) => counts.high += 1,
                    _ => {}
                }
                counts
            })
    }

    /// Counts findings and derives the density for an image of `size`
    pub fn aggregate(report: &ScanReport, size: ImageSize) -> (SeverityCounts, Density) {
        let counts = Self::count(report);
        (counts, Density::compute(counts, size))
    }
}
