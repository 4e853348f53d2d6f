/// Use cases module containing the orchestration of each pipeline stage
mod authenticate_registry;
mod check_prerequisites;
mod consolidate_dataset;
mod mirror_images;
mod pipeline_tracker;
mod provision_infrastructure;
mod scan_timepoint;

pub use authenticate_registry::AuthenticateRegistryUseCase;
pub use check_prerequisites::CheckPrerequisitesUseCase;
pub use consolidate_dataset::ConsolidateDatasetUseCase;
pub use mirror_images::MirrorImagesUseCase;
pub use pipeline_tracker::PipelineTracker;
pub use provision_infrastructure::ProvisionInfrastructureUseCase;
pub use scan_timepoint::ScanTimepointUseCase;

use crate::shared::error::PipelineError;
use crate::study::domain::TrackedImage;
use chrono::{SecondsFormat, Utc};

/// Current time as RFC 3339 UTC with second precision (`2024-05-01T10:00:00Z`)
pub(crate) fn utc_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Labels a per-image failure with the stage and step it happened in
pub(crate) fn image_step_failed(
    image: &TrackedImage,
    stage: &str,
    step: &str,
    error: anyhow::Error,
) -> anyhow::Error {
    PipelineError::ImageStepFailed {
        image: image.display_name(),
        stage: stage.to_string(),
        step: step.to_string(),
        details: format!("{:#}", error),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utc_now_format() {
        let now = utc_now();
        assert_eq!(now.len(), 20);
        assert!(now.ends_with('Z'));
        assert_eq!(&now[10..11], "T");
    }
}
