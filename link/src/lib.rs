//! # trainify-link: Trainify Client Library
//!
//! Client SDK for the Trainify dataset management and RAG training
//! service. Trainify itself is a thin presentation layer: authentication,
//! ingestion, embedding, and inference are all owned by two remote HTTP
//! services. This crate does the client's actual work: issuing requests
//! with an explicit session, normalizing loose list payloads, and
//! monitoring asynchronous ingestion jobs with optimistic cancellation.
//!
//! ## Features
//!
//! - **Explicit sessions**: the Bearer token is carried by an injected
//!   [`SessionContext`] with explicit hydrate/teardown, never global state
//! - **Job monitoring**: fixed-interval polling with full-snapshot
//!   replacement, at most one fetch in flight, deterministic teardown
//! - **Optimistic cancel**: immediate local transition, reconciled by the
//!   next poll; optional deterministic rollback on request failure
//! - **Snapshot normalization**: array and id-keyed payload shapes produce
//!   the same ordered, deduplicated lists
//! - **Transient notices**: every failure reduces to one auto-expiring,
//!   human-readable notification; nothing is thrown past the monitor
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use trainify_link::{MonitorEvent, MonitorOptions, TrainifyClient};
//! use trainify_link::session::MemorySessionStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TrainifyClient::builder()
//!         .base_url("http://localhost:4000/api")
//!         .inference_url("http://localhost:5001")
//!         .build()?;
//!
//!     let mut store = MemorySessionStore::new();
//!     client.login("alice@example.com", "secret", &mut store).await?;
//!
//!     let mut monitor = client.monitor_jobs(MonitorOptions::default());
//!     while let Some(event) = monitor.next().await {
//!         match event {
//!             MonitorEvent::Snapshot(snapshot) => {
//!                 for job in &snapshot.jobs {
//!                     println!("{}: {}", job.dataset_name, job.status);
//!                 }
//!             }
//!             MonitorEvent::Notice(notice) => eprintln!("{}", notice),
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod datasets;
pub mod error;
pub mod events;
pub mod jobs;
pub mod models;
pub mod monitor;
pub mod normalize;
pub mod rag;
pub mod session;
pub mod timeouts;

// Re-export main types for convenience
pub use client::TrainifyClient;
pub use datasets::{DatasetsApi, UploadFile, ALLOWED_EXTENSIONS};
pub use error::{Result, TrainifyError};
pub use events::{EventHandlers, Notice, Severity};
pub use jobs::{JobsApi, StatusSource};
pub use models::{
    Dataset, DatasetDetail, Job, JobSnapshot, JobStatus, LoginResponse, ProcessingFile,
    RagAnswer, RagHistory, UserInfo,
};
pub use monitor::{JobMonitor, MonitorEvent, MonitorOptions};
pub use rag::{Conversation, RagApi};
pub use session::SessionContext;
pub use timeouts::TrainifyTimeouts;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
