use crate::shared::Result;
use crate::study::domain::ImageReference;

/// ContainerEngine port for moving images between registries and the local store
///
/// Every call blocks until the engine has finished; there is no timeout.
pub trait ContainerEngine {
    /// Pulls `reference` if it is not present locally
    ///
    /// # Returns
    /// The size of the local image in bytes
    ///
    /// # Errors
    /// Returns an error if the pull fails or the size cannot be read
    fn pull(&self, reference: &ImageReference) -> Result<u64>;

    /// Adds `target` as a second name for the local image `source`
    fn tag(&self, source: &ImageReference, target: &ImageReference) -> Result<()>;

    /// Pushes `reference` to its registry
    ///
    /// # Errors
    /// Returns an error if the engine is not authenticated or the push is rejected
    fn push(&self, reference: &ImageReference) -> Result<()>;
}
