use crate::shared::error::PipelineError;
use crate::shared::Result;
use crate::study::domain::{ImageReference, TrackedImage};

/// Maps tracked images to fully qualified references inside the study registry
pub struct ImageResolver;

impl ImageResolver {
    /// Returns `<host>/<repo>:<tag>` for `image`.
    ///
    /// # Errors
    /// [`PipelineError::UnknownRegistryHost`] when `registry_host` is blank; there
    /// is no fallback registry.
    pub fn resolve(image: &TrackedImage, registry_host: &str) -> Result<ImageReference> {
        let host = registry_host.trim().trim_end_matches('/');
        if host.is_empty() {
            return Err(PipelineError::UnknownRegistryHost {
                repo: image.repo().to_string(),
                tag: image.tag().to_string(),
            }
            .into());
        }

        ImageReference::new(format!("{}/{}:{}", host, image.repo(), image.tag()))
    }

    /// Resolves every image, stopping at the first failure
    pub fn resolve_all(
        images: &[TrackedImage],
        registry_host: &str,
    ) -> Result<Vec<(TrackedImage, ImageReference)>> {
        images
            .iter()
            .map(|image| -> Result<(TrackedImage, ImageReference)> {
                Ok((image.clone(), Self::resolve(image, registry_host)?))
            })
            .collect()
    }
}
