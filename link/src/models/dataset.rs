use serde::{Deserialize, Serialize};

/// A document dataset as returned by the list endpoint.
///
/// `chunks` is left as raw JSON: the client only ever counts them (the
/// chunking itself is owned by the inference service).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dataset {
    #[serde(rename = "_id", default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(rename = "createdAt", default)]
    pub created_at: String,

    /// Id of the owning user, present on some API variants.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    #[serde(default)]
    pub chunks: Vec<serde_json::Value>,
}

impl Dataset {
    /// Number of embedded chunks the dataset currently holds.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }
}
