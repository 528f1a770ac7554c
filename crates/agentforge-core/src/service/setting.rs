//! Per-user settings service.
//!
//! Provider API keys are sealed through [`SecretCipher`] before they reach
//! the repository and are only opened for masking or for a provider call.

use chrono::Utc;

use agentforge_types::error::SettingError;
use agentforge_types::id::UserId;
use agentforge_types::provider::ProviderKind;
use agentforge_types::setting::{SettingsView, UpdateSettingsRequest, UserSettings, mask_secret};

use crate::repository::setting::SettingRepository;
use crate::service::credential::SecretCipher;

pub struct SettingService<S: SettingRepository, C: SecretCipher> {
    repo: S,
    cipher: C,
}

impl<S: SettingRepository, C: SecretCipher> SettingService<S, C> {
    pub fn new(repo: S, cipher: C) -> Self {
        Self { repo, cipher }
    }

    /// Stored settings, or empty settings when the user never saved any.
    pub async fn load(&self, user_id: &UserId) -> Result<UserSettings, SettingError> {
        Ok(self
            .repo
            .get(user_id)
            .await
            .map_err(|e| SettingError::StorageError(e.to_string()))?
            .unwrap_or_else(|| UserSettings::empty(user_id.clone())))
    }

    /// Settings with every key masked.
    pub async fn view(&self, user_id: &UserId) -> Result<SettingsView, SettingError> {
        let stored = self
            .repo
            .get(user_id)
            .await
            .map_err(|e| SettingError::StorageError(e.to_string()))?;
        Ok(match stored {
            Some(settings) => self.to_view(&settings, true),
            None => self.to_view(&UserSettings::empty(user_id.clone()), false),
        })
    }

    /// Apply a partial update: absent = unchanged, empty = cleared.
    pub async fn update(
        &self,
        user_id: &UserId,
        request: &UpdateSettingsRequest,
    ) -> Result<SettingsView, SettingError> {
        let mut settings = self.load(user_id).await?;

        for kind in ProviderKind::ALL {
            match request.key_for(kind).map(str::trim) {
                None => {}
                Some("") => {
                    settings.sealed_keys.remove(&kind);
                }
                Some(key) => {
                    let sealed = self.cipher.seal(key)?;
                    settings.sealed_keys.insert(kind, sealed);
                }
            }
        }

        if let Some(url) = request.litellm_base_url.as_deref() {
            settings.litellm_base_url = non_empty(url);
        }
        if let Some(provider) = request.default_provider.as_deref() {
            settings.default_provider = match non_empty(provider) {
                Some(p) => Some(p.parse().map_err(SettingError::InvalidProvider)?),
                None => None,
            };
        }
        if let Some(model) = request.default_model.as_deref() {
            settings.default_model = non_empty(model);
        }
        settings.updated_at = Utc::now();

        self.repo
            .upsert(&settings)
            .await
            .map_err(|e| SettingError::StorageError(e.to_string()))?;
        tracing::debug!(user_id = %user_id, "settings updated");

        Ok(self.to_view(&settings, true))
    }

    /// The user's own decrypted key for `kind`, if stored.
    pub fn open_key(
        &self,
        settings: &UserSettings,
        kind: ProviderKind,
    ) -> Result<Option<String>, SettingError> {
        settings
            .sealed_keys
            .get(&kind)
            .map(|sealed| self.cipher.open(sealed))
            .transpose()
    }

    fn to_view(&self, settings: &UserSettings, saved: bool) -> SettingsView {
        let mut view = SettingsView {
            litellm_base_url: settings.litellm_base_url.clone(),
            default_provider: settings.default_provider,
            default_model: settings.default_model.clone(),
            updated_at: saved.then_some(settings.updated_at),
            ..Default::default()
        };
        for (kind, sealed) in &settings.sealed_keys {
            let masked = match self.cipher.open(sealed) {
                Ok(key) => mask_secret(&key),
                Err(_) => {
                    tracing::warn!(provider = %kind, "stored key could not be decrypted");
                    mask_secret("")
                }
            };
            view.set_key(*kind, Some(masked));
        }
        view
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
