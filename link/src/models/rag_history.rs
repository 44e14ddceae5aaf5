use serde::{Deserialize, Serialize};

/// One prompt/answer exchange in a stored conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RagMessage {
    pub prompt: String,

    /// Empty while a reply is still pending (optimistic entries).
    #[serde(default)]
    pub answer: String,
}

/// The user's stored RAG conversation, as returned by
/// `GET users/rag-query-history`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RagHistory {
    #[serde(rename = "_id", default)]
    pub id: String,

    /// RFC3339 timestamp of the last exchange.
    #[serde(default)]
    pub datetime: String,

    #[serde(default)]
    pub messages: Vec<RagMessage>,

    /// Model the conversation ran against.
    #[serde(default)]
    pub model: String,

    /// Dataset id the conversation queried.
    #[serde(default)]
    pub dataset: String,
}
