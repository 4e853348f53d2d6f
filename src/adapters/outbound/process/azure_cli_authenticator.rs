use super::CommandRunner;
use crate::ports::outbound::RegistryAuthenticator;
use crate::shared::error::PipelineError;
use crate::shared::Result;
use crate::study::domain::RegistryConfig;

/// AzureCliAuthenticator adapter: `az acr login` configures the local
/// container engine's credentials for the registry
pub struct AzureCliAuthenticator {
    az: CommandRunner,
}

impl AzureCliAuthenticator {
    pub fn new() -> Self {
        Self {
            az: CommandRunner::new("az"),
        }
    }

    pub fn with_runner(az: CommandRunner) -> Self {
        Self { az }
    }
}

impl Default for AzureCliAuthenticator {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryAuthenticator for AzureCliAuthenticator {
    fn authenticate(&self, registry: &RegistryConfig) -> Result<()> {
        self.az
            .run(&["acr", "login", "--name", registry.name()])
            .map_err(|e| PipelineError::AuthenticationFailed {
                registry: registry.name().to_string(),
                details: format!("{:#}", e),
            })?;
        Ok(())
    }
}
