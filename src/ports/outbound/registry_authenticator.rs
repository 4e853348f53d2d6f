use crate::shared::Result;
use crate::study::domain::RegistryConfig;

/// RegistryAuthenticator port for logging the container engine into the registry
pub trait RegistryAuthenticator {
    /// Authenticates against `registry`; success or failure only
    fn authenticate(&self, registry: &RegistryConfig) -> Result<()>;
}
