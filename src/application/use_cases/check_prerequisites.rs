use crate::application::dto::RequiredTool;
use crate::ports::outbound::{ProgressReporter, ToolLocator};
use crate::shared::error::PipelineError;
use crate::shared::Result;
use std::path::PathBuf;

/// CheckPrerequisitesUseCase - Verifies local tools before a stage starts
///
/// # Type Parameters
/// * `TL` - ToolLocator implementation
/// * `PR` - ProgressReporter implementation
pub struct CheckPrerequisitesUseCase<TL, PR> {
    tool_locator: TL,
    progress_reporter: PR,
}

impl<TL, PR> CheckPrerequisitesUseCase<TL, PR>
where
    TL: ToolLocator,
    PR: ProgressReporter,
{
    pub fn new(tool_locator: TL, progress_reporter: PR) -> Self {
        Self {
            tool_locator,
            progress_reporter,
        }
    }

    /// Locates every tool in `tools`.
    ///
    /// All tools are looked up so that every missing one is reported at once.
    ///
    /// # Errors
    /// [`PipelineError::MissingTool`] for the first tool that was not found
    pub fn execute(&self, tools: &[RequiredTool]) -> Result<Vec<(RequiredTool, PathBuf)>> {
        let mut found = Vec::with_capacity(tools.len());
        let mut missing = Vec::new();

        for tool in tools {
            match self.tool_locator.locate(tool.name) {
                Some(path) => {
                    log::debug!("Found {} at {}", tool.name, path.display());
                    found.push((*tool, path));
                }
                None => {
                    self.progress_reporter
                        .report_error(&format!("❌ {} not found on PATH", tool.name));
                    missing.push(*tool);
                }
            }
        }

        if let Some(tool) = missing.first() {
            anyhow::bail!(PipelineError::MissingTool {
                tool: tool.name.to_string(),
                hint: tool.hint.to_string(),
            });
        }

        Ok(found)
    }

    /// Like [`execute`](Self::execute), but prints one line per tool
    pub fn execute_verbose(&self, tools: &[RequiredTool]) -> Result<Vec<(RequiredTool, PathBuf)>> {
        let found = self.execute(tools)?;
        for (tool, path) in &found {
            self.progress_reporter
                .report(&format!("✅ {:<10} {}", tool.name, path.display()));
        }
        self.progress_reporter
            .report_completion("All required tools are installed");
        Ok(found)
    }
}
