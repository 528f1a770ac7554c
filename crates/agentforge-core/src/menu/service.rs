//! Menu generation use case.

use std::sync::Arc;

use agentforge_types::config::SandboxConfig;
use agentforge_types::error::GenerationError;
use agentforge_types::id::UserId;
use agentforge_types::menu::{GenerateMenuRequest, GenerateMenuResponse};

use crate::llm::resolver::ProviderResolver;
use crate::repository::setting::SettingRepository;
use crate::service::credential::SecretCipher;

use super::parser::parse_menu;
use super::prompt::{MAX_TOKENS, SYSTEM_PROMPT, TEMPERATURE, build_prompt};
use super::sandbox::sandbox_url;

pub struct MenuService<S: SettingRepository, C: SecretCipher> {
    resolver: Arc<ProviderResolver<S, C>>,
    sandbox: SandboxConfig,
}

impl<S: SettingRepository, C: SecretCipher> MenuService<S, C> {
    pub fn new(resolver: Arc<ProviderResolver<S, C>>, sandbox: SandboxConfig) -> Self {
        Self { resolver, sandbox }
    }

    /// Validate the request, call the chosen provider and parse its menu.
    ///
    /// Unlike the other LLM helpers, the provider must be named explicitly.
    pub async fn generate(
        &self,
        user_id: &UserId,
        request: GenerateMenuRequest,
    ) -> Result<GenerateMenuResponse, GenerationError> {
        let title = request.title.trim();
        if title.is_empty() {
            return Err(GenerationError::Validation("title is required".into()));
        }
        let provider_name = request
            .provider
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| GenerationError::Validation("provider is required".into()))?;
        if !request.customizations.is_object() {
            return Err(GenerationError::Validation(
                "customizations must be an object".into(),
            ));
        }

        let agents: Vec<_> = request.agents.into_iter().filter(|a| !a.name.is_empty()).collect();
        let tools: Vec<_> = request.tools.into_iter().filter(|t| !t.name.is_empty()).collect();

        let provider = self
            .resolver
            .resolve(user_id, Some(provider_name), request.model.as_deref())
            .await?;
        tracing::info!(
            user_id = %user_id,
            provider = %provider.kind,
            model = %provider.model,
            agents = agents.len(),
            tools = tools.len(),
            "generating menu"
        );

        let reply = provider
            .ask(
                SYSTEM_PROMPT,
                build_prompt(title, &agents, &tools, &request.customizations),
                MAX_TOKENS,
                Some(TEMPERATURE),
            )
            .await?;

        let menu = parse_menu(&reply).inspect_err(|e| {
            tracing::warn!(provider = %provider.kind, error = %e, "unusable menu reply");
        })?;
        let sandbox_url = self
            .sandbox
            .enabled
            .then(|| sandbox_url(&self.sandbox.base_url, &menu));

        Ok(GenerateMenuResponse { menu, sandbox_url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::resolver_with_key;
    use agentforge_types::error::SettingError;
    use agentforge_types::provider::ProviderKind;

    const REPLY: &str = r#"[{"name":"Agent Configuration","items":["Planner role"]},
        {"name":"Core Settings","items":["Temperature"]}]"#;

    fn request(json: &str) -> GenerateMenuRequest {
        serde_json::from_str(json).unwrap()
    }

    #[tokio::test]
    async fn test_generate_returns_menu_and_sandbox() {
        let (user, resolver) = resolver_with_key(ProviderKind::Github, REPLY).await;
        let svc = MenuService::new(resolver, SandboxConfig::default());

        let response = svc
            .generate(
                &user,
                request(r#"{"title":"Ops","agents":["Planner"],"provider":"github"}"#),
            )
            .await
            .unwrap();
        assert_eq!(response.menu.len(), 2);
        assert_eq!(response.menu[1].items, vec!["Temperature"]);
        assert!(response.sandbox_url.unwrap().starts_with("https://codesandbox.io/"));
    }

    #[tokio::test]
    async fn test_sandbox_disabled() {
        let (user, resolver) = resolver_with_key(ProviderKind::Github, REPLY).await;
        let sandbox = SandboxConfig {
            enabled: false,
            ..Default::default()
        };
        let svc = MenuService::new(resolver, sandbox);
        let response = svc
            .generate(&user, request(r#"{"title":"Ops","provider":"github"}"#))
            .await
            .unwrap();
        assert!(response.sandbox_url.is_none());
    }

    #[tokio::test]
    async fn test_request_validation() {
        let (user, resolver) = resolver_with_key(ProviderKind::Github, REPLY).await;
        let svc = MenuService::new(resolver, SandboxConfig::default());

        for body in [
            r#"{"title":"","provider":"github"}"#,
            r#"{"title":"Ops"}"#,
            r#"{"title":"Ops","provider":" "}"#,
            r#"{"title":"Ops","provider":"github","customizations":[1]}"#,
        ] {
            assert!(
                matches!(svc.generate(&user, request(body)).await, Err(GenerationError::Validation(_))),
                "{body}"
            );
        }
        assert!(matches!(
            svc.generate(&user, request(r#"{"title":"Ops","provider":"bard"}"#)).await,
            Err(GenerationError::Setting(SettingError::InvalidProvider(_)))
        ));
    }

    #[tokio::test]
    async fn test_malformed_reply() {
        let (user, resolver) = resolver_with_key(ProviderKind::Github, "Sorry, no menu today.").await;
        let svc = MenuService::new(resolver, SandboxConfig::default());
        assert!(matches!(
            svc.generate(&user, request(r#"{"title":"Ops","provider":"github"}"#)).await,
            Err(GenerationError::Malformed(_))
        ));
    }
}
