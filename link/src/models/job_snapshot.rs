use super::{Job, ProcessingFile};
use serde::{Deserialize, Serialize};

/// One atomic poll result: the full current set of jobs and their files.
///
/// A snapshot always replaces the previous one in full; the client never
/// merges two snapshots.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct JobSnapshot {
    #[serde(default)]
    pub jobs: Vec<Job>,

    #[serde(rename = "processingFiles", default)]
    pub processing_files: Vec<ProcessingFile>,
}

impl JobSnapshot {
    /// Look up a job by id.
    pub fn job(&self, job_id: &str) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == job_id)
    }

    /// All files belonging to `job_id`, in snapshot order.
    ///
    /// Returns an empty list for a job id absent from the snapshot.
    pub fn files_for(&self, job_id: &str) -> Vec<&ProcessingFile> {
        self.processing_files
            .iter()
            .filter(|f| f.job_id == job_id)
            .collect()
    }

    /// `true` when the snapshot carries no jobs at all.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
