use crate::shared::error::PipelineError;
use crate::shared::Result;
use crate::study::domain::Severity;
use serde::Deserialize;
use std::str::FromStr;

/// Scanner JSON report for one image, reduced to the fields the study reads.
///
/// `Results` and each target's `Vulnerabilities` may be absent or `null`
/// for clean images; both mean "no findings".
#[derive(Debug, Clone, Deserialize)]
pub struct ScanReport {
    #[serde(rename = "SchemaVersion")]
    pub schema_version: u32,
    #[serde(rename = "ArtifactName", default)]
    pub artifact_name: Option<String>,
    #[serde(rename = "Results", default)]
    pub results: Option<Vec<ScanTarget>>,
}

/// One scanned target (OS packages, a language lockfile, ...)
#[derive(Debug, Clone, Deserialize)]
pub struct ScanTarget {
    #[serde(rename = "Target", default)]
    pub target: String,
    #[serde(rename = "Vulnerabilities", default)]
    pub vulnerabilities: Option<Vec<Finding>>,
}

/// A single reported vulnerability
#[derive(Debug, Clone, Deserialize)]
pub struct Finding {
    #[serde(rename = "VulnerabilityID", default)]
    pub vulnerability_id: String,
    #[serde(rename = "PkgName", default)]
    pub package_name: String,
    #[serde(rename = "Severity")]
    pub severity: String,
}

impl Finding {
    /// Parsed severity label; unrecognised labels are `None`
    pub fn severity(&self) -> Option<Severity> {
        Severity::from_str(&self.severity).ok()
    }
}

/// Report schema versions this tool knows how to read
const SUPPORTED_SCHEMA_VERSION: u32 = 2;

impl ScanReport {
    /// Parses raw scanner output, validating it against the expected schema.
    ///
    /// Blank output is reported as [`PipelineError::EmptyScanOutput`] by the caller;
    /// here it is a schema error like any other malformed document.
    pub fn parse(raw: &str) -> Result<Self> {
        let report: ScanReport =
            serde_json::from_str(raw).map_err(|e| PipelineError::ReportSchemaError {
                details: e.to_string(),
            })?;

        if report.schema_version != SUPPORTED_SCHEMA_VERSION {
            anyhow::bail!(PipelineError::ReportSchemaError {
                details: format!(
                    "Unsupported SchemaVersion {} (expected {})",
                    report.schema_version, SUPPORTED_SCHEMA_VERSION
                ),
            });
        }

        Ok(report)
    }

    /// All findings across every target
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.results
            .iter()
            .flatten()
            .filter_map(|target| target.vulnerabilities.as_ref())
            .flatten()
    }
}
