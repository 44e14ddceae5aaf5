use super::JobStatus;
use serde::{Deserialize, Serialize};

/// Per-file ingestion record, always owned by exactly one [`Job`].
///
/// A file whose `job_id` matches no job in the same snapshot is not an
/// error; it simply never shows up under any job (the client does not
/// enforce the foreign key).
///
/// [`Job`]: super::Job
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProcessingFile {
    #[serde(rename = "_id", default)]
    pub id: String,

    /// Owning job.
    #[serde(default)]
    pub job_id: String,

    #[serde(default)]
    pub file_name: String,

    #[serde(default)]
    pub status: JobStatus,

    #[serde(rename = "createdAt", default)]
    pub created_at: String,

    #[serde(rename = "finishedAt", skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
