use crate::shared::error::PipelineError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Upper bound for any dataset, report or configuration file we read (50 MB).
///
/// Scanner JSON for a single base image is a few megabytes at most.
pub const MAX_INPUT_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Checks that `path` is a regular file within the size limit before it is read.
///
/// Symbolic links are rejected; the dataset directories are written by this
/// tool only and a link there means something else is tampering with them.
pub fn validate_input_file(path: &Path) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| PipelineError::FileReadError {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;

    if metadata.is_symlink() {
        return Err(PipelineError::FileReadError {
            path: path.to_path_buf(),
            details: "Refusing to read through a symbolic link".to_string(),
        }
        .into());
    }

    if !metadata.is_file() {
        return Err(PipelineError::FileReadError {
            path: path.to_path_buf(),
            details: "Not a regular file".to_string(),
        }
        .into());
    }

    if metadata.len() > MAX_INPUT_FILE_SIZE {
        return Err(PipelineError::FileReadError {
            path: path.to_path_buf(),
            details: format!(
                "File is too large ({} bytes). Maximum allowed size is {} bytes.",
                metadata.len(),
                MAX_INPUT_FILE_SIZE
            ),
        }
        .into());
    }

    Ok(())
}

/// Checks that an output path, if it already exists, is not a symbolic link.
pub fn validate_output_path(path: &Path) -> Result<()> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.is_symlink() => Err(PipelineError::FileWriteError {
            path: path.to_path_buf(),
            details: "Refusing to write through a symbolic link".to_string(),
        }
        .into()),
        Ok(_) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(PipelineError::FileWriteError {
            path: path.to_path_buf(),
            details: format!("Failed to read file metadata: {}", e),
        }
        .into()),
    }
}

/// Reads a file as UTF-8 after [`validate_input_file`].
pub fn read_input_file(path: &Path) -> Result<String> {
    validate_input_file(path)?;
    fs::read_to_string(path).map_err(|e| {
        PipelineError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_validate_input_file_regular_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("resultados_t0.csv");
        fs::write(&file_path, "timepoint\n").unwrap();

        assert!(validate_input_file(&file_path).is_ok());
    }

    #[test]
    fn test_validate_input_file_nonexistent() {
        let result = validate_input_file(&PathBuf::from("/nonexistent/file.csv"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to read file"));
    }

    #[test]
    fn test_validate_input_file_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = validate_input_file(temp_dir.path());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Not a regular file"));
    }

    #[cfg(unix)]
    #[test]
    fn test_validate_input_file_rejects_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("real.csv");
        let link = temp_dir.path().join("link.csv");
        fs::write(&target, "x").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let result = validate_input_file(&link);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("symbolic link"));
    }

    #[test]
    fn test_validate_output_path_missing_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        assert!(validate_output_path(&temp_dir.path().join("new.csv")).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_validate_output_path_rejects_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("real.csv");
        let link = temp_dir.path().join("link.csv");
        fs::write(&target, "x").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        assert!(validate_output_path(&link).is_err());
    }

    #[test]
    fn test_read_input_file_content() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("report.json");
        fs::write(&file_path, "{}").unwrap();

        assert_eq!(read_input_file(&file_path).unwrap(), "{}");
    }
}
