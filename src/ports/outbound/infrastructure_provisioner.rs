use crate::shared::Result;
use crate::study::domain::RegistryConfig;

/// InfrastructureProvisioner port for creating the study registry
pub trait InfrastructureProvisioner {
    /// Applies the infrastructure definition and reads back its outputs
    ///
    /// # Returns
    /// The registry name and login server produced by provisioning
    ///
    /// # Errors
    /// Returns an error if applying fails or either output is missing
    fn provision(&self) -> Result<RegistryConfig>;
}
