use std::collections::HashMap;
use vuln_timeline::prelude::*;

const CLEAN_REPORT: &str = r#"{"SchemaVersion": 2, "ArtifactName": "image", "Results": []}"#;

/// Mock VulnerabilityScanner returning canned reports per image
#[derive(Clone)]
pub struct MockVulnerabilityScanner {
    reports: HashMap<String, String>,
    version_report: String,
}

#[allow(dead_code)]
impl MockVulnerabilityScanner {
    pub fn new(version_report: &str) -> Self {
        Self {
            reports: HashMap::new(),
            version_report: version_report.to_string(),
        }
    }

    /// Report returned for the image whose last path segment is `short_name`
    pub fn with_report(mut self, short_name: &str, report: &str) -> Self {
        self.reports
            .insert(short_name.to_string(), report.to_string());
        self
    }
}

impl VulnerabilityScanner for MockVulnerabilityScanner {
    fn scan(&self, reference: &ImageReference, _severities: &SeverityFilter) -> Result<String> {
        Ok(self
            .reports
            .get(reference.short_name())
            .cloned()
            .unwrap_or_else(|| CLEAN_REPORT.to_string()))
    }

    fn version_report(&self) -> Result<String> {
        Ok(self.version_report.clone())
    }
}
