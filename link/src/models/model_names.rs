use serde::{Deserialize, Serialize};

/// Response envelope of `GET models/names`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelNames {
    /// Names of the models available for RAG queries.
    #[serde(default)]
    pub data: Vec<String>,
}
