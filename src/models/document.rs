use serde::{Deserialize, Serialize};

/// A verification document uploaded for a customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    pub id: Option<String>,
    /// Review status (`pending`, `reviewed`).
    pub status: Option<String>,
    /// Document kind (`passport`, `license`, `idCard`, `other`).
    #[serde(rename = "type")]
    pub document_type: Option<String>,
    /// ISO-8601 creation timestamp.
    pub created: Option<String>,
}
