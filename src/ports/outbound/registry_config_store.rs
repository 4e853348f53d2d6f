use crate::shared::Result;
use crate::study::domain::RegistryConfig;

/// RegistryConfigStore port for the registry coordinates shared between stages
///
/// Provisioning saves them once; every later stage loads them at start-up.
pub trait RegistryConfigStore {
    /// Loads the registry configuration
    ///
    /// # Errors
    /// Returns [`crate::shared::error::PipelineError::MissingRegistryConfig`]
    /// when either value is absent
    fn load(&self) -> Result<RegistryConfig>;

    fn save(&self, registry: &RegistryConfig) -> Result<()>;
}
