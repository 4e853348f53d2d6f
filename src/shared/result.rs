/// Result alias used across the pipeline; domain failures travel as
/// [`crate::shared::error::PipelineError`] inside `anyhow::Error`.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
