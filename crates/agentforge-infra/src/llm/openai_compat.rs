//! Chat-completions client shared by every supported vendor.
//!
//! OpenAI, Hugging Face's router, GitHub Models, LiteLLM and OpenRouter all
//! accept the OpenAI wire format; only the base URL, key and model differ.

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::error::OpenAIError;
use async_openai::types::chat::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
    CreateChatCompletionResponse, FinishReason,
};
use secrecy::{ExposeSecret, SecretString};

use agentforge_core::llm::provider::LlmProvider;
use agentforge_types::llm::{
    CompletionRequest, CompletionResponse, FinishKind, LlmError, MessageRole, Usage,
};

/// Provider client bound to one vendor endpoint and key.
///
/// Not `Debug`: the inner client carries the key.
pub struct OpenAiCompatibleProvider {
    client: Client<OpenAIConfig>,
    name: String,
    default_model: String,
}

impl OpenAiCompatibleProvider {
    pub fn new(name: &str, api_key: &SecretString, base_url: &str, default_model: &str) -> Self {
        let config = OpenAIConfig::new()
            .with_api_base(base_url.trim_end_matches('/'))
            .with_api_key(api_key.expose_secret());
        Self {
            client: Client::with_config(config),
            name: name.to_string(),
            default_model: default_model.to_string(),
        }
    }

    fn to_wire(&self, request: &CompletionRequest) -> CreateChatCompletionRequest {
        let system = request.system.iter().map(|text| system_message(text));
        let turns = request.messages.iter().map(|m| match m.role {
            MessageRole::System => system_message(&m.content),
            MessageRole::User => ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                content: ChatCompletionRequestUserMessageContent::Text(m.content.clone()),
                name: None,
            }),
        });

        let model = match request.model.trim() {
            "" => self.default_model.clone(),
            model => model.to_string(),
        };

        CreateChatCompletionRequest {
            model,
            messages: system.chain(turns).collect(),
            max_completion_tokens: Some(request.max_tokens),
            temperature: request.temperature.map(|t| t as f32),
            ..Default::default()
        }
    }
}

fn system_message(text: &str) -> ChatCompletionRequestMessage {
    ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
        content: ChatCompletionRequestSystemMessageContent::Text(text.to_string()),
        name: None,
    })
}

/// Keep the first choice only; an answer without choices is empty text.
fn from_wire(response: CreateChatCompletionResponse) -> CompletionResponse {
    let first = response.choices.into_iter().next();
    let finish = match first.as_ref().and_then(|c| c.finish_reason.as_ref()) {
        Some(FinishReason::Stop) | None => FinishKind::Stop,
        Some(FinishReason::Length) => FinishKind::Length,
        Some(FinishReason::ContentFilter) => FinishKind::ContentFilter,
        Some(_) => FinishKind::Other,
    };
    let usage = response.usage.map_or_else(Usage::default, |u| Usage {
        input_tokens: u.prompt_tokens,
        output_tokens: u.completion_tokens,
    });

    CompletionResponse {
        content: first.and_then(|c| c.message.content).unwrap_or_default(),
        model: response.model,
        finish,
        usage,
    }
}

impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let wire = self.to_wire(request);
        tracing::debug!(provider = %self.name, model = %wire.model, "chat completion request");

        let response = self.client.chat().create(wire).await.map_err(|e| {
            let mapped = llm_error(e);
            tracing::debug!(provider = %self.name, error = %mapped, "chat completion failed");
            mapped
        })?;
        Ok(from_wire(response))
    }
}

fn llm_error(err: OpenAIError) -> LlmError {
    match err {
        OpenAIError::ApiError(api) => classify_api_error(
            api.code.as_deref().unwrap_or_default(),
            api.r#type.as_deref().unwrap_or_default(),
            &api.message,
        ),
        OpenAIError::Reqwest(e) => match e.status().map(|s| s.as_u16()) {
            Some(401 | 403) => LlmError::AuthenticationFailed,
            Some(429) => LlmError::RateLimited,
            Some(500..=599) => LlmError::Unavailable(e.to_string()),
            _ => LlmError::Transport(e.to_string()),
        },
        OpenAIError::JSONDeserialize(_, body) => LlmError::Deserialization(body),
        OpenAIError::InvalidArgument(msg) => LlmError::Rejected(msg),
        other => LlmError::Transport(other.to_string()),
    }
}

/// Vendors disagree on where they put the error kind, so both `code` and
/// `type` are checked.
fn classify_api_error(code: &str, kind: &str, message: &str) -> LlmError {
    let is = |wanted: &[&str]| wanted.contains(&code) || wanted.contains(&kind);

    if is(&["rate_limit_exceeded", "rate_limit_error", "too_many_requests"]) {
        LlmError::RateLimited
    } else if is(&["invalid_api_key", "authentication_error", "unauthorized"])
        || message.to_ascii_lowercase().contains("api key")
    {
        LlmError::AuthenticationFailed
    } else if is(&["server_error", "overloaded_error", "service_unavailable"]) {
        LlmError::Unavailable(message.to_string())
    } else {
        LlmError::Rejected(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentforge_types::llm::Message;

    fn github_models() -> OpenAiCompatibleProvider {
        OpenAiCompatibleProvider::new(
            "github",
            &SecretString::from("ghp_test"),
            "https://models.github.ai/inference/",
            "openai/gpt-4o",
        )
    }

    fn menu_call(model: &str) -> CompletionRequest {
        CompletionRequest {
            model: model.to_string(),
            messages: vec![Message::user("Build a menu for: Support Desk")],
            system: Some("You create mod menus.".to_string()),
            max_tokens: 2000,
            temperature: Some(0.7),
        }
    }

    #[test]
    fn test_system_prompt_precedes_user_turn() {
        let wire = github_models().to_wire(&menu_call("openai/gpt-4o-mini"));
        assert_eq!(wire.model, "openai/gpt-4o-mini");
        assert!(matches!(wire.messages[0], ChatCompletionRequestMessage::System(_)));
        assert!(matches!(wire.messages[1], ChatCompletionRequestMessage::User(_)));
        assert_eq!(wire.messages.len(), 2);
        assert_eq!(wire.max_completion_tokens, Some(2000));
        assert_eq!(wire.temperature, Some(0.7));
    }

    #[test]
    fn test_blank_model_falls_back_to_default() {
        assert_eq!(github_models().to_wire(&menu_call("  ")).model, "openai/gpt-4o");
    }

    #[test]
    fn test_api_error_classification() {
        assert!(matches!(
            classify_api_error("invalid_api_key", "invalid_request_error", "Incorrect API key provided"),
            LlmError::AuthenticationFailed
        ));
        assert!(matches!(
            classify_api_error("unauthorized", "", "Bad credentials"),
            LlmError::AuthenticationFailed
        ));
        assert!(matches!(
            classify_api_error("", "rate_limit_error", "slow down"),
            LlmError::RateLimited
        ));
        assert!(matches!(
            classify_api_error("server_error", "", "try later"),
            LlmError::Unavailable(_)
        ));
        match classify_api_error("model_not_found", "invalid_request_error", "model not found") {
            LlmError::Rejected(msg) => assert_eq!(msg, "model not found"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_invalid_argument_is_rejected_request() {
        let err = llm_error(OpenAIError::InvalidArgument("bad temperature".to_string()));
        assert!(matches!(err, LlmError::Rejected(_)));
    }
}
