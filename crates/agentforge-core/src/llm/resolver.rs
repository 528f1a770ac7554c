//! Per-request provider resolution.
//!
//! Picks the provider kind (request, else the user's default), the API key
//! (user's sealed key, else the server-level key), the base URL and the
//! model, then asks the [`ProviderFactory`] for a client.

use std::collections::HashMap;
use std::sync::Arc;

use agentforge_types::config::ProviderEndpoint;
use agentforge_types::error::{GenerationError, SettingError};
use agentforge_types::id::UserId;
use agentforge_types::llm::{CompletionRequest, FinishKind, LlmError, Message};
use agentforge_types::provider::ProviderKind;
use agentforge_types::setting::ProviderCredentials;

use crate::repository::setting::SettingRepository;
use crate::service::credential::SecretCipher;
use crate::service::setting::SettingService;

use super::box_provider::BoxLlmProvider;
use super::factory::{ProviderFactory, default_base_url, default_model};

/// A provider client bound to the model it should be called with.
pub struct ResolvedProvider {
    pub kind: ProviderKind,
    pub model: String,
    pub provider: BoxLlmProvider,
}

impl ResolvedProvider {
    /// Single-turn completion returning the reply text.
    pub async fn ask(
        &self,
        system: &str,
        prompt: String,
        max_tokens: u32,
        temperature: Option<f64>,
    ) -> Result<String, LlmError> {
        let request = CompletionRequest {
            model: self.model.clone(),
            messages: vec![Message::user(prompt)],
            system: Some(system.to_string()),
            max_tokens,
            temperature,
        };
        let response = self.provider.complete(&request).await?;
        tracing::debug!(
            provider = %self.kind,
            model = %response.model,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            finish = %response.finish,
            "completion finished"
        );
        if response.finish == FinishKind::Length {
            tracing::warn!(provider = %self.kind, max_tokens, "completion truncated at max_tokens");
        }
        Ok(response.content)
    }
}

pub struct ProviderResolver<S: SettingRepository, C: SecretCipher> {
    settings: Arc<SettingService<S, C>>,
    endpoints: HashMap<ProviderKind, ProviderEndpoint>,
    factory: Arc<dyn ProviderFactory>,
}

impl<S: SettingRepository, C: SecretCipher> ProviderResolver<S, C> {
    /// `endpoints` carries the server-level overrides (base URL, default
    /// model, fallback key) per provider.
    pub fn new(
        settings: Arc<SettingService<S, C>>,
        endpoints: HashMap<ProviderKind, ProviderEndpoint>,
        factory: Arc<dyn ProviderFactory>,
    ) -> Self {
        Self {
            settings,
            endpoints,
            factory,
        }
    }

    /// Resolve credentials for a call made on behalf of `user_id`.
    ///
    /// `requested` is the raw provider string from the request body; a blank
    /// or missing value falls back to the user's default provider.
    pub async fn credentials(
        &self,
        user_id: &UserId,
        requested: Option<&str>,
        model: Option<&str>,
    ) -> Result<ProviderCredentials, GenerationError> {
        let settings = self.settings.load(user_id).await?;

        let kind = match requested.map(str::trim).filter(|p| !p.is_empty()) {
            Some(name) => name
                .parse::<ProviderKind>()
                .map_err(SettingError::InvalidProvider)?,
            None => settings.default_provider.ok_or(GenerationError::NoProvider)?,
        };
        let endpoint = self.endpoints.get(&kind);

        let api_key = match self.settings.open_key(&settings, kind)? {
            Some(key) => key,
            None => endpoint
                .and_then(|e| e.api_key.clone())
                .filter(|k| !k.is_empty())
                .ok_or(SettingError::MissingApiKey(kind))?,
        };

        let user_base_url = match kind {
            ProviderKind::LiteLlm => settings.litellm_base_url.clone(),
            _ => None,
        };
        let base_url = user_base_url
            .or_else(|| endpoint.and_then(|e| e.base_url.clone()))
            .unwrap_or_else(|| default_base_url(kind).to_string());

        let user_model = settings
            .default_model
            .clone()
            .filter(|_| settings.default_provider == Some(kind));
        let model = model
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .or(user_model)
            .or_else(|| endpoint.and_then(|e| e.default_model.clone()))
            .unwrap_or_else(|| default_model(kind).to_string());

        Ok(ProviderCredentials {
            kind,
            api_key,
            base_url: Some(base_url),
            model: Some(model),
        })
    }

    /// Resolve credentials and build the provider client.
    pub async fn resolve(
        &self,
        user_id: &UserId,
        requested: Option<&str>,
        model: Option<&str>,
    ) -> Result<ResolvedProvider, GenerationError> {
        let credentials = self.credentials(user_id, requested, model).await?;
        let provider = self.factory.create(&credentials)?;
        tracing::debug!(user_id = %user_id, provider = %credentials.kind, "provider resolved");
        Ok(ResolvedProvider {
            kind: credentials.kind,
            model: credentials
                .model
                .unwrap_or_else(|| default_model(credentials.kind).to_string()),
            provider,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CannedFactory, FakeCipher, MemorySettingRepository};
    use agentforge_types::setting::UpdateSettingsRequest;

    fn resolver(
        endpoints: HashMap<ProviderKind, ProviderEndpoint>,
    ) -> (
        Arc<SettingService<MemorySettingRepository, FakeCipher>>,
        ProviderResolver<MemorySettingRepository, FakeCipher>,
    ) {
        let settings = Arc::new(SettingService::new(
            MemorySettingRepository::default(),
            FakeCipher,
        ));
        let resolver = ProviderResolver::new(
            settings.clone(),
            endpoints,
            Arc::new(CannedFactory::replying("ok")),
        );
        (settings, resolver)
    }

    async fn save(
        settings: &SettingService<MemorySettingRepository, FakeCipher>,
        user: &UserId,
        json: &str,
    ) {
        let request: UpdateSettingsRequest = serde_json::from_str(json).unwrap();
        settings.update(user, &request).await.unwrap();
    }

    #[tokio::test]
    async fn test_user_key_and_defaults() {
        let (settings, resolver) = resolver(HashMap::new());
        let user = UserId::new();
        save(&settings, &user, r#"{"openrouterApiKey":"sk-or-user-key"}"#).await;

        let creds = resolver
            .credentials(&user, Some("OpenRouter"), None)
            .await
            .unwrap();
        assert_eq!(creds.kind, ProviderKind::OpenRouter);
        assert_eq!(creds.api_key, "sk-or-user-key");
        assert_eq!(creds.base_url.as_deref(), Some("https://openrouter.ai/api/v1"));
        assert_eq!(creds.model.as_deref(), Some("openai/gpt-4o"));
    }

    #[tokio::test]
    async fn test_falls_back_to_server_key_and_overrides() {
        let mut endpoints = HashMap::new();
        endpoints.insert(
            ProviderKind::OpenAi,
            ProviderEndpoint {
                base_url: Some("https://proxy.internal/v1".into()),
                default_model: Some("gpt-4o-mini".into()),
                api_key: Some("sk-server".into()),
            },
        );
        let (_, resolver) = resolver(endpoints);

        let creds = resolver
            .credentials(&UserId::new(), Some("openai"), Some("o3-mini"))
            .await
            .unwrap();
        assert_eq!(creds.api_key, "sk-server");
        assert_eq!(creds.base_url.as_deref(), Some("https://proxy.internal/v1"));
        assert_eq!(creds.model.as_deref(), Some("o3-mini"));
    }

    #[tokio::test]
    async fn test_default_provider_and_model_from_settings() {
        let (settings, resolver) = resolver(HashMap::new());
        let user = UserId::new();
        save(
            &settings,
            &user,
            r#"{"litellmApiKey":"sk-lite","litellmBaseUrl":"http://litellm:4000","defaultProvider":"litellm","defaultModel":"claude-3-haiku"}"#,
        )
        .await;

        let resolved = resolver.resolve(&user, None, None).await.unwrap();
        assert_eq!(resolved.kind, ProviderKind::LiteLlm);
        assert_eq!(resolved.model, "claude-3-haiku");

        let creds = resolver.credentials(&user, Some(""), None).await.unwrap();
        assert_eq!(creds.base_url.as_deref(), Some("http://litellm:4000"));
    }

    #[tokio::test]
    async fn test_resolution_errors() {
        let (_, resolver) = resolver(HashMap::new());
        let user = UserId::new();

        assert!(matches!(
            resolver.credentials(&user, None, None).await,
            Err(GenerationError::NoProvider)
        ));
        assert!(matches!(
            resolver.credentials(&user, Some("anthropic"), None).await,
            Err(GenerationError::Setting(SettingError::InvalidProvider(_)))
        ));
        assert!(matches!(
            resolver.credentials(&user, Some("github"), None).await,
            Err(GenerationError::Setting(SettingError::MissingApiKey(ProviderKind::Github)))
        ));
    }
}
