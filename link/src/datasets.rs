//! Dataset management over HTTP: listing, detail, rename, delete, and
//! multipart upload to the ingestion endpoint.

use crate::error::{Result, TrainifyError};
use crate::models::{
    ApiErrorBody, Dataset, DatasetDetail, UploadProgress, UploadProgressCallback,
};
use crate::normalize::normalize_list;
use crate::session::SessionContext;
use log::{debug, warn};
use serde_json::Value;
use std::time::Duration;

/// File extensions the ingestion pipeline accepts.
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    ".docx", ".doc", ".odt", ".pptx", ".ppt", ".xlsx", ".csv", ".tsv", ".eml", ".msg", ".rtf",
    ".epub", ".html", ".xml", ".pdf", ".png", ".jpg", ".jpeg", ".heic", ".txt",
];

/// `true` when `file_name`'s extension is accepted by the pipeline.
pub fn is_allowed_file(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    ALLOWED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// One file queued for upload, already read into memory.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

const MAX_RETRIES: u32 = 3;

/// Dataset endpoints of the management API, plus the inference-side upload.
#[derive(Clone)]
pub struct DatasetsApi {
    base_url: String,
    inference_url: String,
    http: reqwest::Client,
    session: SessionContext,
    upload_timeout: Duration,
}

impl DatasetsApi {
    pub(crate) fn new(
        base_url: String,
        inference_url: String,
        http: reqwest::Client,
        session: SessionContext,
        upload_timeout: Duration,
    ) -> Self {
        Self {
            base_url,
            inference_url,
            http,
            session,
            upload_timeout,
        }
    }

    /// `GET {base}/datasets/get-user-datasets`.
    ///
    /// The endpoint historically returned either an array or an id-keyed
    /// object; both normalize to the same ordered list.
    pub async fn list(&self) -> Result<Vec<Dataset>> {
        let url = format!("{}/datasets/get-user-datasets", self.base_url);
        let payload = self.get_json_with_retry(&url, "Failed to load datasets").await?;
        Ok(normalize_list(payload))
    }

    /// `GET {base}/datasets/dataset/{id}`.
    pub async fn detail(&self, dataset_id: &str) -> Result<DatasetDetail> {
        let url = format!("{}/datasets/dataset/{}", self.base_url, dataset_id);
        let payload = self.get_json_with_retry(&url, "Failed to load dataset").await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// `PATCH {base}/datasets/dataset/{id}` with the new name.
    pub async fn rename(&self, dataset_id: &str, name: &str) -> Result<()> {
        let url = format!("{}/datasets/dataset/{}", self.base_url, dataset_id);
        debug!("[DATASETS] PATCH {}", url);

        let request = self
            .session
            .apply_to_request(self.http.patch(&url))
            .json(&serde_json::json!({ "name": name }));
        let response = request.send().await?;
        self.check_status(response, "Rename failed").await?;
        Ok(())
    }

    /// `DELETE {base}/datasets/{id}`.
    pub async fn delete(&self, dataset_id: &str) -> Result<()> {
        let url = format!("{}/datasets/{}", self.base_url, dataset_id);
        debug!("[DATASETS] DELETE {}", url);

        let request = self.session.apply_to_request(self.http.delete(&url));
        let response = request.send().await?;
        self.check_status(response, "Delete failed").await?;
        Ok(())
    }

    /// `POST {inference}/upload-rag`: multipart upload of dataset files.
    ///
    /// Creates the ingestion job server-side; progress of the job itself is
    /// observed via the job monitor afterwards. Rejects files whose
    /// extension the pipeline does not accept before any bytes are sent.
    pub async fn upload(
        &self,
        dataset_name: &str,
        files: Vec<UploadFile>,
        progress: Option<UploadProgressCallback>,
    ) -> Result<()> {
        if dataset_name.is_empty() {
            return Err(TrainifyError::Configuration(
                "Dataset name is required".into(),
            ));
        }
        if files.is_empty() {
            return Err(TrainifyError::Configuration(
                "At least one file is required".into(),
            ));
        }
        if let Some(bad) = files.iter().find(|f| !is_allowed_file(&f.file_name)) {
            return Err(TrainifyError::Configuration(format!(
                "File type not allowed: {}",
                bad.file_name
            )));
        }

        let total = files.len();
        let mut form = reqwest::multipart::Form::new().text("datasetName", dataset_name.to_string());

        for (index, file) in files.into_iter().enumerate() {
            let file_name = file.file_name.clone();
            let part = reqwest::multipart::Part::bytes(file.bytes).file_name(file.file_name);
            form = form.part("files", part);

            if let Some(cb) = &progress {
                cb(UploadProgress {
                    file_name,
                    completed: index + 1,
                    total,
                });
            }
        }

        let url = format!("{}/upload-rag", self.inference_url);
        debug!("[DATASETS] POST {} ({} file(s))", url, total);

        let request = self
            .session
            .apply_to_request(self.http.post(&url))
            .timeout(self.upload_timeout)
            .multipart(form);
        let response = request.send().await?;
        self.check_status(response, "Upload failed. Please try again.")
            .await?;

        if let Some(cb) = &progress {
            cb(UploadProgress {
                file_name: String::new(),
                completed: total,
                total,
            });
        }
        Ok(())
    }

    /// GET a JSON payload with bounded retry on transient transport errors.
    ///
    /// Mirrors the mutation-free read path: connect/timeout failures retry
    /// up to [`MAX_RETRIES`] times with linear backoff; HTTP error statuses
    /// never retry.
    async fn get_json_with_retry(&self, url: &str, fallback: &str) -> Result<Value> {
        let mut retries = 0;
        loop {
            debug!("[DATASETS] GET {} (attempt {}/{})", url, retries + 1, MAX_RETRIES + 1);

            let request = self.session.apply_to_request(self.http.get(url));
            match request.send().await {
                Ok(response) => {
                    let response = self.check_status(response, fallback).await?;
                    return Ok(response.json().await?);
                }
                Err(e) => {
                    let err = TrainifyError::from(e);
                    if retries < MAX_RETRIES && err.is_retriable() {
                        retries += 1;
                        warn!("[DATASETS] Retriable error (attempt {}): {}", retries, err);
                        tokio::time::sleep(Duration::from_millis(100 * retries as u64)).await;
                        continue;
                    }
                    return Err(err);
                }
            }
        }
    }

    async fn check_status(
        &self,
        response: reqwest::Response,
        fallback: &str,
    ) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = ApiErrorBody::message_from(&body).unwrap_or_else(|| fallback.to_string());
        warn!("[DATASETS] Server error: status={} message=\"{}\"", status, message);
        Err(TrainifyError::Server {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_allow_list_is_case_insensitive() {
        assert!(is_allowed_file("report.PDF"));
        assert!(is_allowed_file("notes.txt"));
        assert!(is_allowed_file("deck.pptx"));
        assert!(!is_allowed_file("malware.exe"));
        assert!(!is_allowed_file("archive.tar.gz"));
        assert!(!is_allowed_file("no_extension"));
    }
}
