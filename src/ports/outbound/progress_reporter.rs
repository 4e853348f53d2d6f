/// ProgressReporter port for stage progress output
///
/// Every stage reports one line per image or step; warnings for skipped
/// images go through `report_error` so they reach the error stream.
pub trait ProgressReporter {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports progress through a list of images
    ///
    /// # Arguments
    /// * `current` - Number of items processed so far
    /// * `total` - Total number of items
    /// * `message` - Optional message to include
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of a stage
    fn report_completion(&self, message: &str);
}
