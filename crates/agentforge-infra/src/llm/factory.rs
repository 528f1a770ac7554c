//! Production [`ProviderFactory`].

use secrecy::SecretString;

use agentforge_core::llm::box_provider::BoxLlmProvider;
use agentforge_core::llm::factory::{ProviderFactory, default_base_url, default_model};
use agentforge_types::llm::LlmError;
use agentforge_types::setting::ProviderCredentials;

use super::openai_compat::OpenAiCompatibleProvider;

/// Builds an [`OpenAiCompatibleProvider`] for any [`ProviderKind`](agentforge_types::provider::ProviderKind),
/// filling unset base URL and model from the per-kind defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultProviderFactory;

impl ProviderFactory for DefaultProviderFactory {
    fn create(&self, credentials: &ProviderCredentials) -> Result<BoxLlmProvider, LlmError> {
        if credentials.api_key.trim().is_empty() {
            return Err(LlmError::AuthenticationFailed);
        }
        let base_url = credentials
            .base_url
            .as_deref()
            .unwrap_or_else(|| default_base_url(credentials.kind));
        let model = credentials
            .model
            .as_deref()
            .unwrap_or_else(|| default_model(credentials.kind));
        let secret = SecretString::from(credentials.api_key.clone());

        let provider =
            OpenAiCompatibleProvider::new(credentials.kind.as_str(), &secret, base_url, model);
        Ok(BoxLlmProvider::new(provider))
    }
}
