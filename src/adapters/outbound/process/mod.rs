/// Process adapters driving the external command-line tools
///
/// Every tool call is a blocking subprocess with an argv vector; nothing
/// goes through a shell.
mod azure_cli_authenticator;
mod command_runner;
mod docker_engine;
mod path_tool_locator;
mod terraform_provisioner;
mod trivy_scanner;

pub use azure_cli_authenticator::AzureCliAuthenticator;
pub use command_runner::CommandRunner;
pub use docker_engine::DockerEngine;
pub use path_tool_locator::PathToolLocator;
pub use terraform_provisioner::TerraformProvisioner;
pub use trivy_scanner::TrivyScanner;
