use super::JobStatus;
use serde::{Deserialize, Serialize};

/// One dataset ingestion job as reported by the management API.
///
/// The wire contract mixes naming conventions (`_id`, `dataset_name`,
/// `createdAt`); the serde renames preserve it exactly. Parsing is lenient:
/// absent fields default rather than rejecting the record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Job {
    #[serde(rename = "_id", default)]
    pub id: String,

    /// Id of the user the job belongs to.
    #[serde(default)]
    pub owner: String,

    /// Name of the dataset being ingested.
    #[serde(default)]
    pub dataset_name: String,

    #[serde(default)]
    pub status: JobStatus,

    /// RFC3339 creation timestamp; snapshots are ordered by this, newest
    /// first.
    #[serde(rename = "createdAt", default)]
    pub created_at: String,

    #[serde(rename = "finishedAt", skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<String>,

    /// Upstream failure message, present on failed jobs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
