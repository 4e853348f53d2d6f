use super::atomic::replace_file;
use crate::ports::outbound::ReportArchive;
use crate::shared::error::PipelineError;
use crate::shared::Result;
use std::io::Write;
use std::path::{Path, PathBuf};

/// FileReportArchive adapter keeping raw scanner JSON under `<data_dir>/raw`
pub struct FileReportArchive {
    raw_dir: PathBuf,
}

impl FileReportArchive {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            raw_dir: data_dir.join("raw"),
        }
    }
}

impl ReportArchive for FileReportArchive {
    fn store(&self, name: &str, content: &str) -> Result<PathBuf> {
        // Names become file names in raw_dir: no separators, no leading dot
        if name.is_empty() || name.starts_with('.') || name.contains(&['/', '\\'][..]) {
            anyhow::bail!(PipelineError::Validation {
                message: format!("Invalid report name: {}", name),
            });
        }

        let path = self.raw_dir.join(format!("{}.json", name));
        replace_file(&path, |file| file.write_all(content.as_bytes()))?;
        Ok(path)
    }
}
