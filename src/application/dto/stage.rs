use std::fmt;

/// An executable the pipeline shells out to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredTool {
    pub name: &'static str,
    pub hint: &'static str,
}

impl RequiredTool {
    pub const TERRAFORM: RequiredTool = RequiredTool {
        name: "terraform",
        hint: "Install Terraform (https://developer.hashicorp.com/terraform/install) and make sure it is on PATH",
    };
    pub const AZURE_CLI: RequiredTool = RequiredTool {
        name: "az",
        hint: "Install the Azure CLI (https://learn.microsoft.com/cli/azure/install-azure-cli) and run `az login`",
    };
    pub const DOCKER: RequiredTool = RequiredTool {
        name: "docker",
        hint: "Install Docker and make sure the daemon is running",
    };
    pub const TRIVY: RequiredTool = RequiredTool {
        name: "trivy",
        hint: "Install Trivy (https://trivy.dev) and make sure it is on PATH",
    };

    pub const ALL: [RequiredTool; 4] = [
        RequiredTool::TERRAFORM,
        RequiredTool::AZURE_CLI,
        RequiredTool::DOCKER,
        RequiredTool::TRIVY,
    ];
}

/// Independently invocable pipeline stages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Provision,
    Authenticate,
    Mirror,
    Scan,
    Consolidate,
}

impl Stage {
    /// Local tools the stage needs before it may start
    pub fn required_tools(&self) -> &'static [RequiredTool] {
        match self {
            Stage::Provision => &[RequiredTool::TERRAFORM, RequiredTool::AZURE_CLI],
            Stage::Authenticate => &[RequiredTool::AZURE_CLI, RequiredTool::DOCKER],
            Stage::Mirror => &[RequiredTool::AZURE_CLI, RequiredTool::DOCKER],
            Stage::Scan => &[RequiredTool::AZURE_CLI, RequiredTool::DOCKER, RequiredTool::TRIVY],
            Stage::Consolidate => &[],
        }
    }

    /// Whether the stage talks to the registry and needs its coordinates
    pub fn needs_registry(&self) -> bool {
        matches!(self, Stage::Authenticate | Stage::Mirror | Stage::Scan)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Provision => "provision",
            Stage::Authenticate => "authenticate",
            Stage::Mirror => "mirror",
            Stage::Scan => "scan",
            Stage::Consolidate => "consolidate",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_requires_scanner_and_engine() {
        let names: Vec<&str> = Stage::Scan.required_tools().iter().map(|t| t.name).collect();
        assert!(names.contains(&"trivy"));
        assert!(names.contains(&"docker"));
    }

    #[test]
    fn test_consolidate_requires_no_tools() {
        assert!(Stage::Consolidate.required_tools().is_empty());
        assert!(!Stage::Consolidate.needs_registry());
    }

    #[test]
    fn test_registry_stages() {
        assert!(Stage::Mirror.needs_registry());
        assert!(Stage::Scan.needs_registry());
        assert!(!Stage::Provision.needs_registry());
    }
}
