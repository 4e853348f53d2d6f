use crate::study::domain::{RegistryConfig, SeverityFilter, Timepoint, TrackedImage};
use crate::study::policies::FailurePolicy;

/// ScanRequest - Input of one scan-at-timepoint run
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub timepoint: Timepoint,
    /// Images to scan, in the order they are processed
    pub images: Vec<TrackedImage>,
    pub registry: RegistryConfig,
    pub severities: SeverityFilter,
    pub failure_policy: FailurePolicy,
}

impl ScanRequest {
    pub fn new(
        timepoint: Timepoint,
        images: Vec<TrackedImage>,
        registry: RegistryConfig,
        severities: SeverityFilter,
        failure_policy: FailurePolicy,
    ) -> Self {
        Self {
            timepoint,
            images,
            registry,
            severities,
            failure_policy,
        }
    }
}
