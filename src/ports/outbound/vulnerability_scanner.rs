use crate::shared::Result;
use crate::study::domain::{ImageReference, SeverityFilter};

/// VulnerabilityScanner port for the external scanner
///
/// Output is returned verbatim; parsing and schema validation happen in the
/// domain layer so that the raw report can be archived as produced.
pub trait VulnerabilityScanner {
    /// Scans `reference`, restricted to `severities`
    ///
    /// # Returns
    /// The scanner's JSON report as text
    ///
    /// # Errors
    /// Returns an error if the scanner cannot be started or exits unsuccessfully
    fn scan(&self, reference: &ImageReference, severities: &SeverityFilter) -> Result<String>;

    /// Returns the scanner's human-readable version report
    /// (scanner version and vulnerability database freshness)
    fn version_report(&self) -> Result<String>;
}
