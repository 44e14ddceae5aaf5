//! Job status and cancellation over HTTP.

use crate::error::{Result, TrainifyError};
use crate::models::{ApiErrorBody, JobSnapshot};
use crate::normalize::normalize_list;
use crate::session::SessionContext;
use async_trait::async_trait;
use log::{debug, warn};
use serde_json::Value;

/// Anything the job monitor can poll and cancel against.
///
/// [`JobsApi`] is the production implementation; tests substitute an
/// in-memory fake so monitor behavior can be driven without a server.
#[async_trait]
pub trait StatusSource: Send + Sync + 'static {
    /// Fetch the current snapshot of jobs and files.
    async fn fetch(&self) -> Result<JobSnapshot>;

    /// Request cancellation of a job.
    async fn cancel(&self, job_id: &str) -> Result<()>;
}

/// Job endpoints of the management API.
#[derive(Clone)]
pub struct JobsApi {
    base_url: String,
    http: reqwest::Client,
    session: SessionContext,
}

impl JobsApi {
    pub(crate) fn new(base_url: String, http: reqwest::Client, session: SessionContext) -> Self {
        Self {
            base_url,
            http,
            session,
        }
    }

    /// `GET {base}/datasets/jobs` → one atomic [`JobSnapshot`].
    ///
    /// Both record lists are normalized (sorted newest first, deduplicated)
    /// before the snapshot is returned; callers never see raw wire order.
    pub async fn fetch_snapshot(&self) -> Result<JobSnapshot> {
        let url = format!("{}/datasets/jobs", self.base_url);
        debug!("[JOBS] GET {}", url);

        let request = self.session.apply_to_request(self.http.get(&url));
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = ApiErrorBody::message_from(&body)
                .unwrap_or_else(|| format!("Failed to load jobs (status {})", status.as_u16()));
            warn!("[JOBS] Snapshot fetch failed: status={} message=\"{}\"", status, message);
            return Err(TrainifyError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let payload: Value = response.json().await?;
        let jobs = normalize_list(payload.get("jobs").cloned().unwrap_or(Value::Null));
        let processing_files =
            normalize_list(payload.get("processingFiles").cloned().unwrap_or(Value::Null));

        debug!(
            "[JOBS] Snapshot: {} job(s), {} file(s)",
            jobs.len(),
            processing_files.len()
        );

        Ok(JobSnapshot {
            jobs,
            processing_files,
        })
    }

    /// `POST {base}/datasets/jobs/{id}/cancel`.
    ///
    /// Single-shot: mutations are never retried; the caller surfaces the
    /// failure and the next poll reconciles state.
    pub async fn cancel_job(&self, job_id: &str) -> Result<()> {
        let url = format!("{}/datasets/jobs/{}/cancel", self.base_url, job_id);
        debug!("[JOBS] POST {}", url);

        let request = self.session.apply_to_request(self.http.post(&url));
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = ApiErrorBody::message_from(&body)
                .unwrap_or_else(|| format!("Failed to cancel job (status {})", status.as_u16()));
            warn!(
                "[JOBS] Cancel failed: job_id={} status={} message=\"{}\"",
                job_id, status, message
            );
            return Err(TrainifyError::Server {
                status: status.as_u16(),
                message,
            });
        }

        debug!("[JOBS] Cancel acknowledged: job_id={}", job_id);
        Ok(())
    }
}

#[async_trait]
impl StatusSource for JobsApi {
    async fn fetch(&self) -> Result<JobSnapshot> {
        self.fetch_snapshot().await
    }

    async fn cancel(&self, job_id: &str) -> Result<()> {
        self.cancel_job(job_id).await
    }
}
