use crate::shared::error::PipelineError;
use crate::shared::Result;
use std::fmt;
use std::str::FromStr;

/// Severity labels used by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Unknown,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Unknown => "UNKNOWN",
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "UNKNOWN" => Ok(Severity::Unknown),
            "LOW" => Ok(Severity::Low),
            "MEDIUM" => Ok(Severity::Medium),
            "HIGH" => Ok(Severity::High),
            "CRITICAL" => Ok(Severity::Critical),
            _ => Err(format!(
                "Invalid severity: {}. Expected one of UNKNOWN, LOW, MEDIUM, HIGH, CRITICAL",
                s
            )),
        }
    }
}

/// Severity set the scanner is restricted to.
///
/// Always contains CRITICAL and HIGH, since those are the two counts recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeverityFilter(Vec<Severity>);

impl SeverityFilter {
    pub fn new(mut severities: Vec<Severity>) -> Result<Self> {
        severities.sort_by(|a, b| b.cmp(a));
        severities.dedup();

        for required in [Severity::Critical, Severity::High] {
            if !severities.contains(&required) {
                anyhow::bail!(PipelineError::Validation {
                    message: format!(
                        "Severity filter must include {} (got: {})",
                        required,
                        Self(severities.clone()).to_argument()
                    ),
                });
            }
        }

        Ok(Self(severities))
    }

    /// Comma-separated form the scanner expects (`CRITICAL,HIGH`)
    pub fn to_argument(&self) -> String {
        self.0
            .iter()
            .map(Severity::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn severities(&self) -> &[Severity] {
        &self.0
    }
}

impl Default for SeverityFilter {
    fn default() -> Self {
        Self(vec![Severity::Critical, Severity::High])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_from_str() {
        assert_eq!(Severity::from_str("CRITICAL").unwrap(), Severity::Critical);
        assert_eq!(Severity::from_str("high").unwrap(), Severity::High);
        assert_eq!(Severity::from_str("Medium").unwrap(), Severity::Medium);
        assert!(Severity::from_str("SEVERE").is_err());
    }

    #[test]
    fn test_default_filter_argument() {
        assert_eq!(SeverityFilter::default().to_argument(), "CRITICAL,HIGH");
    }

    #[test]
    fn test_filter_sorted_and_deduplicated() {
        let filter = SeverityFilter::new(vec![
            Severity::High,
            Severity::Medium,
            Severity::Critical,
            Severity::High,
        ])
        .unwrap();
        assert_eq!(filter.to_argument(), "CRITICAL,HIGH,MEDIUM");
    }

    #[test]
    fn test_filter_requires_critical_and_high() {
        let err = SeverityFilter::new(vec![Severity::Critical]).unwrap_err();
        assert!(err.to_string().contains("must include HIGH"));

        let err = SeverityFilter::new(vec![Severity::High, Severity::Low]).unwrap_err();
        assert!(err.to_string().contains("must include CRITICAL"));
    }
}
