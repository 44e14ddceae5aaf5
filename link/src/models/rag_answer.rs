use serde::{Deserialize, Serialize};

/// Result of one RAG query against the inference service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RagAnswer {
    /// Generated answer text.
    pub answer: String,

    /// Retrieved context chunks the answer was grounded on.
    #[serde(default)]
    pub context: Vec<String>,
}
