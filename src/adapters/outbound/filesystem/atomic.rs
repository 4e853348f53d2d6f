use crate::shared::error::PipelineError;
use crate::shared::security::validate_output_path;
use crate::shared::Result;
use std::fs::{self, File};
use std::io;
use std::path::Path;
use tempfile::NamedTempFile;

/// Replaces `path` with the content produced by `write`.
///
/// The content is written to a temporary file in the same directory and
/// renamed over `path`, so readers see either the old or the new file.
/// Missing parent directories are created.
pub(crate) fn replace_file<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let write_error = |details: String| PipelineError::FileWriteError {
        path: path.to_path_buf(),
        details,
    };

    validate_output_path(path)?;
    let dir = match path.parent() {
        Some(parent) if parent != Path::new("") => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| write_error(e.to_string()))?;

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| write_error(e.to_string()))?;
    write(temp.as_file_mut()).map_err(|e| write_error(e.to_string()))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| write_error(e.to_string()))?;
    temp.persist(path).map_err(|e| write_error(e.error.to_string()))?;

    log::debug!("Wrote {}", path.display());
    Ok(())
}
