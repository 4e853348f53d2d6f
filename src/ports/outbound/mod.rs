/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to reach external tools (container engine, scanner, cloud CLIs) and
/// the dataset on disk.
pub mod container_engine;
pub mod dataset_repository;
pub mod infrastructure_provisioner;
pub mod pipeline_state_store;
pub mod progress_reporter;
pub mod registry_config_store;
pub mod registry_authenticator;
pub mod report_archive;
pub mod tool_locator;
pub mod vulnerability_scanner;

pub use container_engine::ContainerEngine;
pub use dataset_repository::{DatasetRepository, Provenance, ProvenanceOutputs};
pub use infrastructure_provisioner::InfrastructureProvisioner;
pub use pipeline_state_store::PipelineStateStore;
pub use progress_reporter::ProgressReporter;
pub use registry_authenticator::RegistryAuthenticator;
pub use registry_config_store::RegistryConfigStore;
pub use report_archive::ReportArchive;
pub use tool_locator::ToolLocator;
pub use vulnerability_scanner::VulnerabilityScanner;
