use serde::{Deserialize, Serialize};

/// Full view of a single dataset, including its source file names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatasetDetail {
    #[serde(rename = "_id", default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(rename = "createdAt", default)]
    pub created_at: String,

    /// Original file names the dataset was built from.
    #[serde(default)]
    pub files: Vec<String>,

    #[serde(default)]
    pub chunks: Vec<serde_json::Value>,
}
