//! Request/response shapes for the LLM helper endpoints and the client
//! error log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::UserId;

/// An error captured by the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientError {
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    /// Anything else the UI attached (component, timestamp, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Body of `POST /api/analyze-error`.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeErrorRequest {
    pub error: ClientError,
    pub provider: Option<String>,
    pub model: Option<String>,
}

/// LLM explanation of an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorAnalysis {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub possible_solution: Option<String>,
}

/// Body of `POST /api/generate-suggestion`: the menu specification being
/// edited, plus optional provider selection.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionRequest {
    pub provider: Option<String>,
    pub model: Option<String>,
    #[serde(flatten)]
    pub specification: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionResponse {
    pub suggestion: String,
}

/// Body of `POST /api/ai-interaction`.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionRequest {
    #[serde(default)]
    pub input: String,
    pub provider: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionResponse {
    pub response: String,
}

/// Body of `POST /api/scan-for-errors`.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanErrorsRequest {
    #[serde(default)]
    pub errors: Vec<ClientError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanErrorsResponse {
    pub new_errors: Vec<ClientError>,
}

/// A client error message already reported by a user.
#[derive(Debug, Clone)]
pub struct ClientErrorRecord {
    pub user_id: UserId,
    /// SHA-256 hex of the trimmed message.
    pub fingerprint: String,
    pub message: String,
    pub first_seen_at: DateTime<Utc>,
    pub occurrences: i64,
}
