use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a job or processing file.
///
/// Transitions are computed server-side; the client only displays them and
/// requests the `canceled` transition. Unrecognized wire values map to
/// [`JobStatus::Unknown`] instead of failing the whole snapshot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Queued, not yet picked up by a worker.
    Pending,

    /// A worker is chunking/embedding the files.
    Processing,

    /// All files ingested successfully. Terminal.
    Completed,

    /// Ingestion aborted with an error. Terminal.
    Failed,

    /// Stopped by user request. Terminal.
    Canceled,

    /// Status string the client does not recognize.
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    /// `true` once no further transition is expected.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::Failed | JobStatus::Canceled
        )
    }

    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
            JobStatus::Canceled => "canceled",
            JobStatus::Unknown => "unknown",
        }
    }
}

impl Default for JobStatus {
    fn default() -> Self {
        JobStatus::Unknown
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
