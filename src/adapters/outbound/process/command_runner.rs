use crate::shared::error::PipelineError;
use crate::shared::Result;
use std::ffi::OsString;
use std::process::{Command, Stdio};

/// Longest stderr excerpt carried in an error message
const MAX_DETAILS_LENGTH: usize = 2000;

/// Runs one external program and captures its output
#[derive(Debug, Clone)]
pub struct CommandRunner {
    program: OsString,
    name: String,
}

impl CommandRunner {
    /// `program` is looked up on PATH by the operating system
    pub fn new(program: &str) -> Self {
        Self {
            program: OsString::from(program),
            name: program.to_string(),
        }
    }

    /// Uses an explicit executable while keeping `name` for messages
    pub fn with_program(name: &str, program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            name: name.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the program with `args` and returns its stdout.
    ///
    /// # Errors
    /// [`PipelineError::ToolFailed`] if the program cannot be started or
    /// exits unsuccessfully; the details carry its stderr.
    pub fn run<S: AsRef<str>>(&self, args: &[S]) -> Result<String> {
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        log::debug!("Running: {} {}", self.name, args.join(" "));

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| PipelineError::ToolFailed {
                tool: self.name.clone(),
                status: "not started".to_string(),
                details: e.to_string(),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            log::debug!("{} failed with {}: {}", self.name, output.status, stderr.trim());
            anyhow::bail!(PipelineError::ToolFailed {
                tool: format!("{} {}", self.name, args.first().copied().unwrap_or_default()),
                status: output.status.to_string(),
                details: excerpt(if stderr.trim().is_empty() { &stdout } else { &stderr }),
            });
        }

        log::debug!("{} finished ({} bytes of output)", self.name, stdout.len());
        Ok(stdout)
    }
}

/// Last `MAX_DETAILS_LENGTH` bytes of `text`, trimmed
fn excerpt(text: &str) -> String {
    let text = text.trim();
    if text.len() <= MAX_DETAILS_LENGTH {
        return text.to_string();
    }
    let mut start = text.len() - MAX_DETAILS_LENGTH;
    while !text.is_char_boundary(start) {
        start += 1;
    }
    format!("...{}", &text[start..])
}
