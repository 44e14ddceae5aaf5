use std::sync::Arc;

/// Progress report emitted while an upload request is being assembled.
///
/// Granularity is per file: one report as each file is added to the
/// multipart form, and a final one when the form is complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadProgress {
    /// File most recently added, empty for the completion report.
    pub file_name: String,

    /// Number of files added so far.
    pub completed: usize,

    /// Total number of files in the upload.
    pub total: usize,
}

impl UploadProgress {
    /// Completion as a 0–100 percentage.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            100
        } else {
            ((self.completed * 100) / self.total) as u8
        }
    }
}

/// Callback invoked with each [`UploadProgress`] report.
pub type UploadProgressCallback = Arc<dyn Fn(UploadProgress) + Send + Sync>;
