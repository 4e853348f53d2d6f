use crate::ports::outbound::{InfrastructureProvisioner, ProgressReporter, RegistryConfigStore};
use crate::shared::Result;
use crate::study::domain::RegistryConfig;

/// ProvisionInfrastructureUseCase - Creates the study registry and records its coordinates
///
/// # Type Parameters
/// * `IP` - InfrastructureProvisioner implementation
/// * `RCS` - RegistryConfigStore implementation
/// * `PR` - ProgressReporter implementation
pub struct ProvisionInfrastructureUseCase<IP, RCS, PR> {
    provisioner: IP,
    registry_store: RCS,
    progress_reporter: PR,
}

impl<IP, RCS, PR> ProvisionInfrastructureUseCase<IP, RCS, PR>
where
    IP: InfrastructureProvisioner,
    RCS: RegistryConfigStore,
    PR: ProgressReporter,
{
    pub fn new(provisioner: IP, registry_store: RCS, progress_reporter: PR) -> Self {
        Self {
            provisioner,
            registry_store,
            progress_reporter,
        }
    }

    /// Provisions the registry once; failures are not retried.
    pub fn execute(&self) -> Result<RegistryConfig> {
        self.progress_reporter
            .report("🏗️  Provisioning container registry...");

        let registry = self.provisioner.provision()?;
        self.progress_reporter.report(&format!(
            "✅ Registry {} available at {}",
            registry.name(),
            registry.login_server()
        ));

        self.registry_store.save(&registry)?;
        self.progress_reporter
            .report_completion("Registry coordinates recorded");

        Ok(registry)
    }
}
