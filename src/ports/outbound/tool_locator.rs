use std::path::PathBuf;

/// ToolLocator port for finding local executables
pub trait ToolLocator {
    /// Returns the full path of `tool` if it can be executed
    fn locate(&self, tool: &str) -> Option<PathBuf>;
}
