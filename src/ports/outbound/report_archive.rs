use crate::shared::Result;
use std::path::PathBuf;

/// ReportArchive port for keeping raw scanner output
pub trait ReportArchive {
    /// Stores `content` under `name` (`<repo>_<tag>_<timepoint>`), replacing any earlier copy
    ///
    /// # Returns
    /// Path of the stored report
    fn store(&self, name: &str, content: &str) -> Result<PathBuf>;
}
