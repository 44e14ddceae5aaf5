//! Data models for the trainify-link client library.
//!
//! One wire type per file; field renames preserve the management API's
//! mixed naming (`_id`, `createdAt`, `dataset_name`) exactly.

pub mod dataset;
pub mod dataset_detail;
pub mod error_body;
pub mod job;
pub mod job_snapshot;
pub mod job_status;
pub mod login_request;
pub mod login_response;
pub mod model_names;
pub mod processing_file;
pub mod rag_answer;
pub mod rag_history;
pub mod register_request;
pub mod upload_progress;
pub mod user_info;


pub use dataset::Dataset;
pub use dataset_detail::DatasetDetail;
pub use error_body::ApiErrorBody;
pub use job::Job;
pub use job_snapshot::JobSnapshot;
pub use job_status::JobStatus;
pub use login_request::LoginRequest;
pub use login_response::LoginResponse;
pub use model_names::ModelNames;
pub use processing_file::ProcessingFile;
pub use rag_answer::RagAnswer;
pub use rag_history::{RagHistory, RagMessage};
pub use register_request::RegisterRequest;
pub use upload_progress::{UploadProgress, UploadProgressCallback};
pub use user_info::UserInfo;
