use super::CommandRunner;
use crate::ports::outbound::ContainerEngine;
use crate::shared::error::PipelineError;
use crate::shared::Result;
use crate::study::domain::ImageReference;

/// DockerEngine adapter driving the `docker` CLI
pub struct DockerEngine {
    docker: CommandRunner,
}

impl DockerEngine {
    pub fn new() -> Self {
        Self {
            docker: CommandRunner::new("docker"),
        }
    }

    pub fn with_runner(docker: CommandRunner) -> Self {
        Self { docker }
    }

    /// Size of a local image in bytes, as reported by `docker image inspect`
    fn image_size(&self, reference: &ImageReference) -> Result<u64> {
        let output = self.docker.run(&[
            "image",
            "inspect",
            "--format",
            "{{.Size}}",
            reference.as_str(),
        ])?;
        parse_image_size(&output)
    }
}

impl Default for DockerEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerEngine for DockerEngine {
    fn pull(&self, reference: &ImageReference) -> Result<u64> {
        self.docker.run(&["pull", reference.as_str()])?;
        self.image_size(reference)
    }

    fn tag(&self, source: &ImageReference, target: &ImageReference) -> Result<()> {
        self.docker.run(&["tag", source.as_str(), target.as_str()])?;
        Ok(())
    }

    fn push(&self, reference: &ImageReference) -> Result<()> {
        self.docker.run(&["push", reference.as_str()])?;
        Ok(())
    }
}

fn parse_image_size(output: &str) -> Result<u64> {
    let raw = output.trim();
    raw.parse::<u64>().map_err(|_| {
        PipelineError::ToolFailed {
            tool: "docker image inspect".to_string(),
            status: "unexpected output".to_string(),
            details: format!("Expected an image size in bytes, got '{}'", raw),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_image_size() {
        assert_eq!(parse_image_size("7735808\n").unwrap(), 7_735_808);
        assert_eq!(parse_image_size("0").unwrap(), 0);
    }

    #[test]
    fn test_parse_image_size_rejects_garbage() {
        let err = parse_image_size("<no value>").unwrap_err();
        assert!(err.to_string().contains("<no value>"));
    }

    #[cfg(unix)]
    #[test]
    fn test_pull_failure_surfaces_stderr() {
        // `false` ignores its arguments and exits 1
        let engine = DockerEngine::with_runner(CommandRunner::with_program("docker", "false"));
        let reference = ImageReference::new("studyacr.azurecr.io/busybox:1.36".to_string()).unwrap();
        let err = engine.pull(&reference).unwrap_err();
        assert!(err.to_string().contains("docker pull"));
    }
}
