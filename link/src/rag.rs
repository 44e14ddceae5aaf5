//! RAG queries, model listing, and conversation history.

use crate::error::{Result, TrainifyError};
use crate::models::{ApiErrorBody, ModelNames, RagAnswer, RagHistory, RagMessage};
use crate::session::SessionContext;
use log::{debug, warn};

/// RAG endpoints: model names and history on the management API, query
/// execution on the inference API.
#[derive(Clone)]
pub struct RagApi {
    base_url: String,
    inference_url: String,
    http: reqwest::Client,
    session: SessionContext,
}

impl RagApi {
    pub(crate) fn new(
        base_url: String,
        inference_url: String,
        http: reqwest::Client,
        session: SessionContext,
    ) -> Self {
        Self {
            base_url,
            inference_url,
            http,
            session,
        }
    }

    /// `GET {base}/models/names` → available model names.
    pub async fn model_names(&self) -> Result<Vec<String>> {
        let url = format!("{}/models/names", self.base_url);
        debug!("[RAG] GET {}", url);

        let request = self.session.apply_to_request(self.http.get(&url));
        let response = request.send().await?;
        let response = check_status(response, "Failed to load models").await?;
        let names: ModelNames = response.json().await?;
        Ok(names.data)
    }

    /// `GET {base}/users/rag-query-history` → the stored conversation.
    pub async fn history(&self) -> Result<RagHistory> {
        let url = format!("{}/users/rag-query-history", self.base_url);
        debug!("[RAG] GET {}", url);

        let request = self.session.apply_to_request(self.http.get(&url));
        let response = request.send().await?;
        let response = check_status(response, "Failed to load query history").await?;
        Ok(response.json().await?)
    }

    /// `POST {inference}/models/rag-query`: run one query.
    ///
    /// Form-encoded like the inference service expects: `datasetId`,
    /// `model`, `query`.
    pub async fn ask(&self, dataset_id: &str, model: &str, query: &str) -> Result<RagAnswer> {
        if query.trim().is_empty() {
            return Err(TrainifyError::Configuration("Query must not be empty".into()));
        }

        let url = format!("{}/models/rag-query", self.inference_url);
        debug!("[RAG] POST {} (model={}, dataset={})", url, model, dataset_id);

        let form = reqwest::multipart::Form::new()
            .text("datasetId", dataset_id.to_string())
            .text("model", model.to_string())
            .text("query", query.to_string());

        let request = self
            .session
            .apply_to_request(self.http.post(&url))
            .multipart(form);
        let response = request.send().await?;
        let response =
            check_status(response, "Failed to send message. Please try again.").await?;
        Ok(response.json().await?)
    }
}

async fn check_status(
    response: reqwest::Response,
    fallback: &str,
) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = ApiErrorBody::message_from(&body).unwrap_or_else(|| fallback.to_string());
    warn!("[RAG] Server error: status={} message=\"{}\"", status, message);
    Err(TrainifyError::Server {
        status: status.as_u16(),
        message,
    })
}

/// Local view of a conversation with optimistic prompt echo.
///
/// The prompt is appended immediately with an empty answer so the view can
/// render it while the query is in flight; [`resolve`] fills the answer in,
/// [`rollback`] removes the entry when the query fails. Unlike the job
/// monitor's cancel path, a failed query *does* roll back.
///
/// [`resolve`]: Conversation::resolve
/// [`rollback`]: Conversation::rollback
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    history: RagHistory,
    pending: bool,
}

impl Conversation {
    /// Wrap a fetched history.
    pub fn new(history: RagHistory) -> Self {
        Self {
            history,
            pending: false,
        }
    }

    /// Append a prompt optimistically, before the server has answered.
    pub fn push_prompt(&mut self, prompt: impl Into<String>) {
        self.history.messages.push(RagMessage {
            prompt: prompt.into(),
            answer: String::new(),
        });
        self.pending = true;
    }

    /// Fill the pending entry with the server's answer.
    pub fn resolve(&mut self, answer: impl Into<String>) {
        if self.pending {
            if let Some(last) = self.history.messages.last_mut() {
                last.answer = answer.into();
            }
            self.pending = false;
        }
    }

    /// Remove the pending entry after a failed query.
    pub fn rollback(&mut self) {
        if self.pending {
            self.history.messages.pop();
            self.pending = false;
        }
    }

    /// `true` while a prompt is awaiting its answer.
    pub fn has_pending(&self) -> bool {
        self.pending
    }

    /// All messages, including a pending one.
    pub fn messages(&self) -> &[RagMessage] {
        &self.history.messages
    }

    /// The underlying history record.
    pub fn history(&self) -> &RagHistory {
        &self.history
    }
}
