use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes let wrapper scripts tell a pipeline failure apart from
/// a usage mistake or a local configuration/I/O problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Stage completed (possibly with skipped images under the skip policy)
    Success = 0,
    /// A pipeline step failed: missing tool, provisioning, authentication, or fail-fast abort
    PipelineFailure = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (configuration, file I/O, dataset validation, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Maps an error to the exit code that describes it.
    ///
    /// Errors that are not a [`PipelineError`] are application errors.
    pub fn for_error(error: &anyhow::Error) -> Self {
        match error.downcast_ref::<PipelineError>() {
            Some(e) if e.is_pipeline_failure() => ExitCode::PipelineFailure,
            _ => ExitCode::ApplicationError,
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::PipelineFailure => write!(f, "Pipeline Failure (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Errors raised by the study pipeline.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// keeping every message labelled and paired with a hint.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Required tool not found: {tool}\n\n💡 Hint: {hint}")]
    MissingTool { tool: String, hint: String },

    #[error("External tool failed: {tool} ({status})\nDetails: {details}")]
    ToolFailed {
        tool: String,
        status: String,
        details: String,
    },

    #[error("Infrastructure provisioning failed\nDetails: {details}\n\n💡 Hint: Check your cloud credentials and permissions, then re-run `provision`")]
    ProvisioningFailed { details: String },

    #[error("Registry authentication failed: {registry}\nDetails: {details}\n\n💡 Hint: Run `az login` and verify you have access to the registry")]
    AuthenticationFailed { registry: String, details: String },

    #[error("Registry configuration is missing {field} (looked in {path} and the environment)\n\n💡 Hint: Run `provision` first, or export {field}")]
    MissingRegistryConfig { field: String, path: PathBuf },

    #[error("Cannot resolve image {repo}:{tag}: registry host is unknown\n\n💡 Hint: Run `provision` so the registry login server is recorded")]
    UnknownRegistryHost { repo: String, tag: String },

    #[error("{step} failed for {image} during {stage}\nDetails: {details}")]
    ImageStepFailed {
        image: String,
        stage: String,
        step: String,
        details: String,
    },

    #[error("Scanner produced no usable output for {image}")]
    EmptyScanOutput { image: String },

    #[error("Scan report does not match the expected schema\nDetails: {details}")]
    ReportSchemaError { details: String },

    #[error("No per-timepoint tables found under {dir}\n\n💡 Hint: Run `scan <timepoint>` at least once before consolidating")]
    NoTimepointTables { dir: PathBuf },

    #[error("Invalid dataset file: {path}\nDetails: {details}")]
    DatasetValidation { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    /// Validation error for value objects and configuration
    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl PipelineError {
    /// Whether this error belongs to the pipeline-failure class of the taxonomy
    /// (tooling, provisioning, authentication, per-image abort).
    pub fn is_pipeline_failure(&self) -> bool {
        matches!(
            self,
            PipelineError::MissingTool { .. }
                | PipelineError::ToolFailed { .. }
                | PipelineError::ProvisioningFailed { .. }
                | PipelineError::AuthenticationFailed { .. }
                | PipelineError::ImageStepFailed { .. }
                | PipelineError::EmptyScanOutput { .. }
                | PipelineError::ReportSchemaError { .. }
        )
    }
}
