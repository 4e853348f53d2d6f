use super::image_step_failed;
use crate::application::dto::MirrorResponse;
use crate::ports::outbound::{ContainerEngine, ProgressReporter};
use crate::shared::Result;
use crate::study::domain::{RegistryConfig, TrackedImage};
use crate::study::services::ImageResolver;

const STAGE: &str = "mirror";

/// MirrorImagesUseCase - Copies the tracked images into the study registry
///
/// Every image is pulled from its source, re-tagged with its registry
/// reference and pushed. Any failure stops the stage: scans need the full set
/// mirrored.
pub struct MirrorImagesUseCase<CE, PR> {
    container_engine: CE,
    progress_reporter: PR,
}

impl<CE, PR> MirrorImagesUseCase<CE, PR>
where
    CE: ContainerEngine,
    PR: ProgressReporter,
{
    pub fn new(container_engine: CE, progress_reporter: PR) -> Self {
        Self {
            container_engine,
            progress_reporter,
        }
    }

    pub fn execute(&self, images: &[TrackedImage], registry: &RegistryConfig) -> Result<MirrorResponse> {
        let resolved = ImageResolver::resolve_all(images, registry.login_server())?;
        let total = resolved.len();
        let mut pushed = Vec::with_capacity(total);

        for (index, (image, target)) in resolved.into_iter().enumerate() {
            self.progress_reporter.report_progress(
                index,
                total,
                Some(&format!("mirroring {}", image.display_name())),
            );

            self.container_engine
                .pull(image.source())
                .map_err(|e| image_step_failed(&image, STAGE, "Pull", e))?;
            self.container_engine
                .tag(image.source(), &target)
                .map_err(|e| image_step_failed(&image, STAGE, "Tag", e))?;
            self.container_engine
                .push(&target)
                .map_err(|e| image_step_failed(&image, STAGE, "Push", e))?;

            self.progress_reporter
                .report(&format!("📦 {} -> {}", image.source(), target));
            pushed.push(target);
        }

        self.progress_reporter
            .report_completion(&format!("Mirrored {} image(s)", pushed.len()));
        Ok(MirrorResponse { pushed })
    }
}
