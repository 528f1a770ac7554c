//! LLM request/response types.
//!
//! These model the chat-completion shapes shared by every provider AgentForge
//! talks to, plus the error type provider clients return.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who authored a message. Calls are single-turn: an optional system
/// prompt followed by user content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// A chat-completion call as the services describe it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model id; empty means the provider's configured default.
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// The first choice of a completion, flattened.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub content: String,
    /// Model that actually answered, as reported by the vendor.
    pub model: String,
    pub finish: FinishKind,
    pub usage: Usage,
}

/// Why generation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishKind {
    /// Natural end of the answer.
    Stop,
    /// Hit `max_tokens`; the content is likely cut off mid-JSON.
    Length,
    ContentFilter,
    /// Anything else the vendor reports (tool calls, unknown values).
    Other,
}

impl fmt::Display for FinishKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FinishKind::Stop => "stop",
            FinishKind::Length => "length",
            FinishKind::ContentFilter => "content_filter",
            FinishKind::Other => "other",
        })
    }
}

/// Token counts reported by the vendor, zero when absent.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Errors from a provider call. Messages never include the API key.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("the provider rejected the API key")]
    AuthenticationFailed,

    #[error("the provider is rate limiting requests")]
    RateLimited,

    #[error("the provider is unavailable: {0}")]
    Unavailable(String),

    #[error("the provider rejected the request: {0}")]
    Rejected(String),

    #[error("unreadable provider response: {0}")]
    Deserialization(String),

    #[error("provider request failed: {0}")]
    Transport(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_error_display() {
        assert_eq!(
            LlmError::Rejected("model not found".into()).to_string(),
            "the provider rejected the request: model not found"
        );
        assert_eq!(LlmError::RateLimited.to_string(), "the provider is rate limiting requests");
    }

    #[test]
    fn test_completion_request_skips_empty_optionals() {
        let req = CompletionRequest {
            model: String::new(),
            messages: vec![Message::user("hi")],
            system: None,
            max_tokens: 16,
            temperature: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("system").is_none());
        assert!(json.get("temperature").is_none());
        assert_eq!(json["messages"][0]["role"], "user");
    }
}
