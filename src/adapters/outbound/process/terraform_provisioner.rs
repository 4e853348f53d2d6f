use super::CommandRunner;
use crate::ports::outbound::InfrastructureProvisioner;
use crate::shared::error::PipelineError;
use crate::shared::Result;
use crate::study::domain::RegistryConfig;
use serde::Deserialize;
use std::path::PathBuf;

/// One entry of `terraform output -json`
#[derive(Debug, Deserialize)]
struct OutputValue {
    value: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct RegistryOutputs {
    acr_name: Option<OutputValue>,
    acr_login_server: Option<OutputValue>,
}

/// TerraformProvisioner adapter applying the registry definition in `infra_dir`
pub struct TerraformProvisioner {
    terraform: CommandRunner,
    infra_dir: PathBuf,
}

impl TerraformProvisioner {
    pub fn new(infra_dir: PathBuf) -> Self {
        Self::with_runner(CommandRunner::new("terraform"), infra_dir)
    }

    pub fn with_runner(terraform: CommandRunner, infra_dir: PathBuf) -> Self {
        Self {
            terraform,
            infra_dir,
        }
    }

    fn terraform(&self, args: &[&str]) -> Result<String> {
        let chdir = format!("-chdir={}", self.infra_dir.display());
        let mut argv = vec![chdir.as_str()];
        argv.extend_from_slice(args);
        self.terraform.run(argv.as_slice())
    }
}

impl InfrastructureProvisioner for TerraformProvisioner {
    fn provision(&self) -> Result<RegistryConfig> {
        if !self.infra_dir.is_dir() {
            anyhow::bail!(PipelineError::ProvisioningFailed {
                details: format!(
                    "Infrastructure directory not found: {}",
                    self.infra_dir.display()
                ),
            });
        }

        let failed = |e: anyhow::Error| PipelineError::ProvisioningFailed {
            details: format!("{:#}", e),
        };

        self.terraform(&["init", "-input=false"]).map_err(failed)?;
        self.terraform(&["apply", "-auto-approve", "-input=false"])
            .map_err(failed)?;
        let outputs = self.terraform(&["output", "-json"]).map_err(failed)?;

        parse_registry_outputs(&outputs)
    }
}

fn parse_registry_outputs(json: &str) -> Result<RegistryConfig> {
    let outputs: RegistryOutputs =
        serde_json::from_str(json).map_err(|e| PipelineError::ProvisioningFailed {
            details: format!("Unreadable terraform outputs: {}", e),
        })?;

    let required = |output: Option<OutputValue>, name: &str| -> Result<String> {
        output
            .and_then(|o| o.value.as_str().map(str::to_string))
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| {
                PipelineError::ProvisioningFailed {
                    details: format!("Terraform output '{}' is missing or not a string", name),
                }
                .into()
            })
    };

    let name = required(outputs.acr_name, "acr_name")?;
    let login_server = required(outputs.acr_login_server, "acr_login_server")?;
    RegistryConfig::new(name, login_server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_registry_outputs() {
        let json = r#"{
            "acr_login_server": {"sensitive": false, "type": "string", "value": "studyacr.azurecr.io"},
            "acr_name": {"sensitive": false, "type": "string", "value": "studyacr"},
            "resource_group": {"sensitive": false, "type": "string", "value": "rg-study"}
        }"#;
        let registry = parse_registry_outputs(json).unwrap();
        assert_eq!(registry.name(), "studyacr");
        assert_eq!(registry.login_server(), "studyacr.azurecr.io");
    }

    #[test]
    fn test_parse_registry_outputs_missing_value() {
        let json = r#"{"acr_name": {"value": "studyacr"}}"#;
        let err = parse_registry_outputs(json).unwrap_err();
        assert!(err.to_string().contains("acr_login_server"));
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::ProvisioningFailed { .. })
        ));
    }

    #[test]
    fn test_provision_without_infra_dir() {
        let temp_dir = TempDir::new().unwrap();
        let provisioner = TerraformProvisioner::new(temp_dir.path().join("missing"));
        let err = provisioner.provision().unwrap_err();
        assert!(err.to_string().contains("Infrastructure directory not found"));
    }

    #[cfg(unix)]
    #[test]
    fn test_apply_failure_is_provisioning_failure() {
        let temp_dir = TempDir::new().unwrap();
        let provisioner = TerraformProvisioner::with_runner(
            CommandRunner::with_program("terraform", "false"),
            temp_dir.path().to_path_buf(),
        );
        let err = provisioner.provision().unwrap_err();
        assert!(err.to_string().starts_with("Infrastructure provisioning failed"));
    }
}
