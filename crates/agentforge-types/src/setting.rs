//! Per-user settings: provider API keys and generation defaults.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::UserId;
use crate::provider::ProviderKind;

/// Settings row for one user.
///
/// API keys are held in sealed (encrypted, base64) form. Only the settings
/// service opens them, and only when a provider call needs the key.
#[derive(Debug, Clone)]
pub struct UserSettings {
    pub user_id: UserId,
    pub sealed_keys: HashMap<ProviderKind, String>,
    /// Base URL of the user's LiteLLM proxy.
    pub litellm_base_url: Option<String>,
    pub default_provider: Option<ProviderKind>,
    pub default_model: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl UserSettings {
    /// Empty settings for a user who never saved any.
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            sealed_keys: HashMap::new(),
            litellm_base_url: None,
            default_provider: None,
            default_model: None,
            updated_at: Utc::now(),
        }
    }
}

/// Settings as returned by `GET /api/user/settings`. Keys are masked.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsView {
    pub openai_api_key: Option<String>,
    pub huggingface_api_key: Option<String>,
    pub github_token: Option<String>,
    pub litellm_api_key: Option<String>,
    pub openrouter_api_key: Option<String>,
    pub litellm_base_url: Option<String>,
    pub default_provider: Option<ProviderKind>,
    pub default_model: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl SettingsView {
    pub fn set_key(&mut self, kind: ProviderKind, masked: Option<String>) {
        match kind {
            ProviderKind::OpenAi => self.openai_api_key = masked,
            ProviderKind::HuggingFace => self.huggingface_api_key = masked,
            ProviderKind::Github => self.github_token = masked,
            ProviderKind::LiteLlm => self.litellm_api_key = masked,
            ProviderKind::OpenRouter => self.openrouter_api_key = masked,
        }
    }
}

/// Body of `POST /api/user/settings`.
///
/// Per field: absent = unchanged, empty string = cleared, otherwise replaced.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    pub openai_api_key: Option<String>,
    pub huggingface_api_key: Option<String>,
    pub github_token: Option<String>,
    pub litellm_api_key: Option<String>,
    pub openrouter_api_key: Option<String>,
    pub litellm_base_url: Option<String>,
    pub default_provider: Option<String>,
    pub default_model: Option<String>,
}

impl UpdateSettingsRequest {
    /// The submitted key for a provider, if the field was present.
    pub fn key_for(&self, kind: ProviderKind) -> Option<&str> {
        match kind {
            ProviderKind::OpenAi => self.openai_api_key.as_deref(),
            ProviderKind::HuggingFace => self.huggingface_api_key.as_deref(),
            ProviderKind::Github => self.github_token.as_deref(),
            ProviderKind::LiteLlm => self.litellm_api_key.as_deref(),
            ProviderKind::OpenRouter => self.openrouter_api_key.as_deref(),
        }
    }
}

/// Decrypted credentials for one provider call.
///
/// Does not derive Debug so the key cannot end up in a log line.
#[derive(Clone)]
pub struct ProviderCredentials {
    pub kind: ProviderKind,
    pub api_key: String,
    pub base_url: Option<String>,
    pub model: Option<String>,
}

/// Values shorter than this are fully masked, so the visible head and tail
/// never cover more than seven of sixteen characters.
const PARTIAL_MASK_MIN_LEN: usize = 16;

/// Mask a secret for display: first three and last four characters.
pub fn mask_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() < PARTIAL_MASK_MIN_LEN {
        return "*".repeat(chars.len().max(4));
    }
    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
