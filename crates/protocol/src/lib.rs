use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Intent label reported when no search handler claims a request.
pub const UNKNOWN_INTENT: &str = "UNKNOWN";

/// Body returned by the classification endpoint.
///
/// Serializes as `{"type": "...", "details": {...}}`; `details` is `{}` unless a handler
/// extracted a search phrase.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    #[serde(rename = "type")]
    pub intent: String,
    pub details: ClassificationDetails,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct ClassificationDetails {
    #[serde(
        rename = "searchQuery",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub search_query: Option<String>,
}

impl ClassificationResult {
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            intent: UNKNOWN_INTENT.to_string(),
            details: ClassificationDetails::default(),
        }
    }

    #[must_use]
    pub fn search(intent: impl Into<String>, search_query: impl Into<String>) -> Self {
        Self {
            intent: intent.into(),
            details: ClassificationDetails {
                search_query: Some(search_query.into()),
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    pub hint: Option<String>,
}

/// Wrapper for non-200 responses: `{"error": {...}}`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: ErrorEnvelope,
}

pub fn serialize_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(Into::into)
}
