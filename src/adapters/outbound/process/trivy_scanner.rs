use super::CommandRunner;
use crate::ports::outbound::VulnerabilityScanner;
use crate::shared::Result;
use crate::study::domain::{ImageReference, SeverityFilter};

/// TrivyScanner adapter driving the `trivy` CLI
pub struct TrivyScanner {
    trivy: CommandRunner,
}

impl TrivyScanner {
    pub fn new() -> Self {
        Self {
            trivy: CommandRunner::new("trivy"),
        }
    }

    pub fn with_runner(trivy: CommandRunner) -> Self {
        Self { trivy }
    }
}

impl Default for TrivyScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Arguments of one image scan; JSON on stdout, progress output suppressed
fn scan_arguments(reference: &ImageReference, severities: &SeverityFilter) -> Vec<String> {
    vec![
        "image".to_string(),
        "--quiet".to_string(),
        "--severity".to_string(),
        severities.to_argument(),
        "--format".to_string(),
        "json".to_string(),
        reference.to_string(),
    ]
}

impl VulnerabilityScanner for TrivyScanner {
    fn scan(&self, reference: &ImageReference, severities: &SeverityFilter) -> Result<String> {
        self.trivy.run(scan_arguments(reference, severities).as_slice())
    }

    fn version_report(&self) -> Result<String> {
        self.trivy.run(&["--version"])
    }
}
