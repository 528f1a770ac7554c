//! Assistant helper use cases: error analysis, suggestions and free-form
//! interaction.

use std::sync::Arc;

use agentforge_types::assist::{
    AnalyzeErrorRequest, ErrorAnalysis, InteractionRequest, InteractionResponse,
    SuggestionRequest, SuggestionResponse,
};
use agentforge_types::error::GenerationError;
use agentforge_types::id::UserId;

use crate::llm::resolver::ProviderResolver;
use crate::menu::parser::strip_code_fence;
use crate::repository::setting::SettingRepository;
use crate::service::credential::SecretCipher;

use super::prompt::{
    ANALYZE_SYSTEM_PROMPT, INTERACTION_SYSTEM_PROMPT, SUGGESTION_SYSTEM_PROMPT, analyze_prompt,
    suggestion_prompt,
};

/// Returned whenever an error analysis cannot be produced.
pub const FALLBACK_ANALYSIS: &str = "An unexpected error occurred";

const MAX_TOKENS: u32 = 800;
const TEMPERATURE: f64 = 0.7;

pub struct AssistService<S: SettingRepository, C: SecretCipher> {
    resolver: Arc<ProviderResolver<S, C>>,
}

impl<S: SettingRepository, C: SecretCipher> AssistService<S, C> {
    pub fn new(resolver: Arc<ProviderResolver<S, C>>) -> Self {
        Self { resolver }
    }

    /// Explain a client-side error. Never fails: any problem resolving the
    /// provider, calling it or reading its reply yields the fallback message.
    pub async fn analyze_error(&self, user_id: &UserId, request: AnalyzeErrorRequest) -> ErrorAnalysis {
        match self.try_analyze(user_id, &request).await {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "error analysis unavailable");
                ErrorAnalysis {
                    message: FALLBACK_ANALYSIS.to_string(),
                    possible_solution: None,
                }
            }
        }
    }

    async fn try_analyze(
        &self,
        user_id: &UserId,
        request: &AnalyzeErrorRequest,
    ) -> Result<ErrorAnalysis, GenerationError> {
        let provider = self
            .resolver
            .resolve(user_id, request.provider.as_deref(), request.model.as_deref())
            .await?;
        let reply = provider
            .ask(
                ANALYZE_SYSTEM_PROMPT,
                analyze_prompt(&request.error),
                MAX_TOKENS,
                Some(TEMPERATURE),
            )
            .await?;
        parse_analysis(&reply)
    }

    pub async fn suggest(
        &self,
        user_id: &UserId,
        request: SuggestionRequest,
    ) -> Result<SuggestionResponse, GenerationError> {
        let provider = self
            .resolver
            .resolve(user_id, request.provider.as_deref(), request.model.as_deref())
            .await?;
        let suggestion = provider
            .ask(
                SUGGESTION_SYSTEM_PROMPT,
                suggestion_prompt(&request.specification),
                MAX_TOKENS,
                Some(TEMPERATURE),
            )
            .await?;
        Ok(SuggestionResponse {
            suggestion: suggestion.trim().to_string(),
        })
    }

    pub async fn interact(
        &self,
        user_id: &UserId,
        request: InteractionRequest,
    ) -> Result<InteractionResponse, GenerationError> {
        let input = request.input.trim();
        if input.is_empty() {
            return Err(GenerationError::Validation("input is required".into()));
        }
        let provider = self
            .resolver
            .resolve(user_id, request.provider.as_deref(), request.model.as_deref())
            .await?;
        let response = provider
            .ask(INTERACTION_SYSTEM_PROMPT, input.to_string(), MAX_TOKENS, Some(TEMPERATURE))
            .await?;
        Ok(InteractionResponse {
            response: response.trim().to_string(),
        })
    }
}

fn parse_analysis(reply: &str) -> Result<ErrorAnalysis, GenerationError> {
    let analysis: ErrorAnalysis = serde_json::from_str(strip_code_fence(reply))
        .map_err(|e| GenerationError::Malformed(e.to_string()))?;
    if analysis.message.trim().is_empty() {
        return Err(GenerationError::Malformed("empty analysis".into()));
    }
    Ok(analysis)
}
