//! Main Trainify client with builder pattern.
//!
//! Provides the primary interface to both backing services: the management
//! API (auth, datasets, jobs, models, history) and the inference API
//! (ingestion upload, RAG queries).

use crate::{
    datasets::DatasetsApi,
    error::{Result, TrainifyError},
    events::EventHandlers,
    jobs::JobsApi,
    models::{ApiErrorBody, LoginRequest, LoginResponse, RegisterRequest},
    monitor::{JobMonitor, MonitorOptions},
    rag::RagApi,
    session::{SessionContext, SessionStore},
    timeouts::TrainifyTimeouts,
};
use log::debug;
use std::sync::Arc;

/// Main Trainify client.
///
/// Use [`TrainifyClient::builder`] to construct instances. The client is
/// cheap to clone; clones share the HTTP connection pool and the session.
///
/// # Examples
///
/// ```rust,no_run
/// use trainify_link::TrainifyClient;
/// use trainify_link::session::MemorySessionStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = TrainifyClient::builder()
///     .base_url("http://localhost:4000/api")
///     .inference_url("http://localhost:5001")
///     .build()?;
///
/// let mut store = MemorySessionStore::new();
/// client.login("alice@example.com", "secret", &mut store).await?;
///
/// let datasets = client.datasets().list().await?;
/// println!("{} dataset(s)", datasets.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TrainifyClient {
    base_url: String,
    inference_url: String,
    http: reqwest::Client,
    session: SessionContext,
    timeouts: TrainifyTimeouts,
}

impl TrainifyClient {
    /// Create a new builder.
    pub fn builder() -> TrainifyClientBuilder {
        TrainifyClientBuilder::new()
    }

    /// `POST {base}/auth/login`, then activate and persist the session.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        store: &mut dyn SessionStore,
    ) -> Result<LoginResponse> {
        let url = format!("{}/auth/login", self.base_url);
        debug!("[AUTH] Logging in {} at {}", email, url);

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.http.post(&url).json(&request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = ApiErrorBody::message_from(&body)
                .unwrap_or_else(|| format!("Login failed (status {})", status.as_u16()));
            return Err(TrainifyError::Authentication(message));
        }

        let login: LoginResponse = response.json().await?;
        self.session
            .activate(login.token.clone(), login.user.clone(), store)?;
        debug!("[AUTH] Logged in as {}", login.user.email);
        Ok(login)
    }

    /// `POST {base}/auth/register`. Does not log the new user in.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<()> {
        let url = format!("{}/auth/register", self.base_url);
        debug!("[AUTH] Registering {} at {}", email, url);

        let request = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.http.post(&url).json(&request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = ApiErrorBody::message_from(&body)
                .unwrap_or_else(|| format!("Registration failed (status {})", status.as_u16()));
            return Err(TrainifyError::Server {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }

    /// Clear the session in memory and in `store`.
    pub fn logout(&self, store: &mut dyn SessionStore) -> Result<()> {
        self.session.teardown(store)
    }

    /// The session context this client attaches to every request.
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Dataset endpoints.
    pub fn datasets(&self) -> DatasetsApi {
        DatasetsApi::new(
            self.base_url.clone(),
            self.inference_url.clone(),
            self.http.clone(),
            self.session.clone(),
            self.timeouts.upload_timeout,
        )
    }

    /// Job endpoints.
    pub fn jobs(&self) -> JobsApi {
        JobsApi::new(
            self.base_url.clone(),
            self.http.clone(),
            self.session.clone(),
        )
    }

    /// RAG endpoints.
    pub fn rag(&self) -> RagApi {
        RagApi::new(
            self.base_url.clone(),
            self.inference_url.clone(),
            self.http.clone(),
            self.session.clone(),
        )
    }

    /// Start a [`JobMonitor`] polling this client's job endpoint.
    ///
    /// Must be called within a tokio runtime; the monitor spawns its poll
    /// task immediately.
    pub fn monitor_jobs(&self, options: MonitorOptions) -> JobMonitor {
        self.monitor_jobs_with_handlers(options, EventHandlers::new())
    }

    /// Start a [`JobMonitor`] with observer callbacks registered.
    pub fn monitor_jobs_with_handlers(
        &self,
        options: MonitorOptions,
        handlers: EventHandlers,
    ) -> JobMonitor {
        JobMonitor::start(Arc::new(self.jobs()), options, handlers)
    }

    /// The configured timeouts.
    pub fn timeouts(&self) -> &TrainifyTimeouts {
        &self.timeouts
    }

    /// Management API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Inference API base URL.
    pub fn inference_url(&self) -> &str {
        &self.inference_url
    }
}

/// Builder for [`TrainifyClient`] instances.
pub struct TrainifyClientBuilder {
    base_url: Option<String>,
    inference_url: Option<String>,
    session: SessionContext,
    timeouts: TrainifyTimeouts,
}

impl TrainifyClientBuilder {
    fn new() -> Self {
        Self {
            base_url: None,
            inference_url: None,
            session: SessionContext::new(),
            timeouts: TrainifyTimeouts::default(),
        }
    }

    /// Set the management API base URL (required).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the inference API base URL. Defaults to the management URL.
    pub fn inference_url(mut self, url: impl Into<String>) -> Self {
        self.inference_url = Some(url.into());
        self
    }

    /// Inject an existing session context (e.g. one hydrated from disk).
    pub fn session(mut self, session: SessionContext) -> Self {
        self.session = session;
        self
    }

    /// Set timeout and polling configuration.
    pub fn timeouts(mut self, timeouts: TrainifyTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<TrainifyClient> {
        let base_url = self
            .base_url
            .map(|u| u.trim_end_matches('/').to_string())
            .ok_or_else(|| TrainifyError::Configuration("base_url is required".into()))?;
        let inference_url = self
            .inference_url
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| base_url.clone());

        // Keep-alive pooling: polling hits the same host every two seconds,
        // so idle connections are kept longer than one poll interval.
        let http = reqwest::Client::builder()
            .timeout(self.timeouts.request_timeout)
            .connect_timeout(self.timeouts.connect_timeout)
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(std::time::Duration::from_secs(90))
            .build()
            .map_err(|e| TrainifyError::Configuration(e.to_string()))?;

        Ok(TrainifyClient {
            base_url,
            inference_url,
            http,
            session: self.session,
            timeouts: self.timeouts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_requires_base_url() {
        let result = TrainifyClient::builder().build();
        assert!(matches!(result, Err(TrainifyError::Configuration(_))));
    }

    #[test]
    fn builder_trims_trailing_slashes() {
        let client = TrainifyClient::builder()
            .base_url("http://localhost:4000/api/")
            .inference_url("http://localhost:5001/")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://localhost:4000/api");
        assert_eq!(client.inference_url(), "http://localhost:5001");
    }

    #[test]
    fn inference_url_defaults_to_base() {
        let client = TrainifyClient::builder()
            .base_url("http://localhost:4000/api")
            .build()
            .unwrap();
        assert_eq!(client.inference_url(), "http://localhost:4000/api");
    }
}
