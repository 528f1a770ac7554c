//! Provider construction and per-kind endpoint defaults.

use agentforge_types::llm::LlmError;
use agentforge_types::provider::ProviderKind;
use agentforge_types::setting::ProviderCredentials;

use super::box_provider::BoxLlmProvider;

/// Builds a ready-to-call provider from resolved credentials.
///
/// Object-safe so the HTTP state can hold `Arc<dyn ProviderFactory>` and
/// tests can swap in a canned provider.
pub trait ProviderFactory: Send + Sync {
    fn create(&self, credentials: &ProviderCredentials) -> Result<BoxLlmProvider, LlmError>;
}

/// Chat-completions base URL used when neither the user nor the server
/// configuration overrides it.
pub fn default_base_url(kind: ProviderKind) -> &'static str {
    match kind {
        ProviderKind::OpenAi => "https://api.openai.com/v1",
        ProviderKind::HuggingFace => "https://router.huggingface.co/v1",
        ProviderKind::Github => "https://models.github.ai/inference",
        ProviderKind::LiteLlm => "http://localhost:4000",
        ProviderKind::OpenRouter => "https://openrouter.ai/api/v1",
    }
}

pub fn default_model(kind: ProviderKind) -> &'static str {
    match kind {
        ProviderKind::OpenAi | ProviderKind::LiteLlm => "gpt-4o",
        ProviderKind::HuggingFace => "meta-llama/Llama-3.1-8B-Instruct",
        ProviderKind::Github | ProviderKind::OpenRouter => "openai/gpt-4o",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_https_default_except_litellm() {
        for kind in ProviderKind::ALL {
            let url = default_base_url(kind);
            if kind == ProviderKind::LiteLlm {
                assert!(url.starts_with("http://localhost"));
            } else {
                assert!(url.starts_with("https://"), "{kind}: {url}");
            }
            assert!(!default_model(kind).is_empty());
        }
    }
}
