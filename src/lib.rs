//! vuln-timeline - longitudinal vulnerability study of container base images
//!
//! This library drives an experiment pipeline: provision a container
//! registry, mirror a fixed set of base images into it, scan every image at
//! four timepoints (T0-T3) with an external scanner, and consolidate the
//! per-timepoint tables into one analysis dataset. It follows hexagonal
//! architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`study`): Pure study logic: result rows, density, aggregation, consolidation
//! - **Application Layer** (`application`): One use case per pipeline stage
//! - **Ports** (`ports`): Interface definitions for external tools and storage
//! - **Adapters** (`adapters`): Concrete implementations of ports (CLI tools, CSV files, console)
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use vuln_timeline::prelude::*;
//! use std::path::Path;
//!
//! # fn main() -> Result<()> {
//! let config = StudyConfig::load(None, Path::new("."))?;
//! let registry = RegistryEnvFile::new(config.registry_env_file.clone()).load()?;
//!
//! let use_case = ScanTimepointUseCase::new(
//!     DockerEngine::new(),
//!     TrivyScanner::new(),
//!     CsvDatasetRepository::new(&config.data_dir),
//!     FileReportArchive::new(&config.data_dir),
//!     StderrProgressReporter::new(),
//! );
//!
//! let request = ScanRequest::new(
//!     Timepoint::T0,
//!     config.images.clone(),
//!     registry,
//!     config.severities.clone(),
//!     config.failure_policy,
//! );
//! let response = use_case.execute(request)?;
//! println!("{} row(s) written", response.rows_written);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod ports;
pub mod shared;
pub mod study;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        CsvDatasetRepository, FileReportArchive, JsonPipelineStateStore, RegistryEnvFile,
    };
    pub use crate::adapters::outbound::process::{
        AzureCliAuthenticator, CommandRunner, DockerEngine, PathToolLocator,
        TerraformProvisioner, TrivyScanner,
    };
    pub use crate::application::dto::{
        ConsolidationResponse, MirrorResponse, RequiredTool, ScanRequest, ScanResponse,
        SkippedImage, Stage,
    };
    pub use crate::application::use_cases::{
        AuthenticateRegistryUseCase, CheckPrerequisitesUseCase, ConsolidateDatasetUseCase,
        MirrorImagesUseCase, PipelineTracker, ProvisionInfrastructureUseCase,
        ScanTimepointUseCase,
    };
    pub use crate::config::StudyConfig;
    pub use crate::ports::outbound::{
        ContainerEngine, DatasetRepository, InfrastructureProvisioner, PipelineStateStore,
        ProgressReporter, Provenance, ProvenanceOutputs, RegistryAuthenticator,
        RegistryConfigStore, ReportArchive, ToolLocator, VulnerabilityScanner,
    };
    pub use crate::shared::error::{ExitCode, PipelineError};
    pub use crate::study::domain::{
        Density, ImageReference, ImageSize, PipelineStage, PipelineState, RegistryConfig,
        ResultRow, ScanReport, ScannerInfo, Severity, SeverityCounts, SeverityFilter, Timepoint,
        TrackedImage, RESULT_COLUMNS,
    };
    pub use crate::study::policies::FailurePolicy;
    pub use crate::study::services::{ComparisonTable, Consolidator, ImageResolver, ReportAggregator};
    pub use crate::shared::Result;
}
