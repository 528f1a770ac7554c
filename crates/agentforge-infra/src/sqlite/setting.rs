//! SQLite per-user settings repository implementation.
//!
//! Sealed keys are stored as-is; this layer never sees plaintext keys.

use std::collections::HashMap;

use sqlx::Row;

use agentforge_core::repository::setting::SettingRepository;
use agentforge_types::error::RepositoryError;
use agentforge_types::id::UserId;
use agentforge_types::provider::ProviderKind;
use agentforge_types::setting::UserSettings;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime, query_error};

pub struct SqliteSettingRepository {
    pool: DatabasePool,
}

impl SqliteSettingRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Column holding the sealed key for each provider.
fn key_column(kind: ProviderKind) -> &'static str {
    match kind {
        ProviderKind::OpenAi => "openai_api_key",
        ProviderKind::HuggingFace => "huggingface_api_key",
        ProviderKind::Github => "github_token",
        ProviderKind::LiteLlm => "litellm_api_key",
        ProviderKind::OpenRouter => "openrouter_api_key",
    }
}

fn settings_from_row(
    user_id: &UserId,
    row: &sqlx::sqlite::SqliteRow,
) -> Result<UserSettings, RepositoryError> {
    let mut sealed_keys = HashMap::new();
    for kind in ProviderKind::ALL {
        let sealed: Option<String> = row.try_get(key_column(kind)).map_err(query_error)?;
        if let Some(sealed) = sealed {
            sealed_keys.insert(kind, sealed);
        }
    }

    let default_provider: Option<String> = row.try_get("default_provider").map_err(query_error)?;
    let default_provider = default_provider
        .map(|p| p.parse::<ProviderKind>())
        .transpose()
        .map_err(RepositoryError::Query)?;
    let updated_at: String = row.try_get("updated_at").map_err(query_error)?;

    Ok(UserSettings {
        user_id: user_id.clone(),
        sealed_keys,
        litellm_base_url: row.try_get("litellm_base_url").map_err(query_error)?,
        default_provider,
        default_model: row.try_get("default_model").map_err(query_error)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

impl SettingRepository for SqliteSettingRepository {
    async fn get(&self, user_id: &UserId) -> Result<Option<UserSettings>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM user_settings WHERE user_id = ?")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;
        row.map(|row| settings_from_row(user_id, &row)).transpose()
    }

    async fn upsert(&self, settings: &UserSettings) -> Result<(), RepositoryError> {
        let key = |kind| settings.sealed_keys.get(&kind).cloned();
        sqlx::query(
            "INSERT INTO user_settings (user_id, openai_api_key, huggingface_api_key, github_token,
                 litellm_api_key, openrouter_api_key, litellm_base_url, default_provider, default_model, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(user_id) DO UPDATE SET
                 openai_api_key = excluded.openai_api_key,
                 huggingface_api_key = excluded.huggingface_api_key,
                 github_token = excluded.github_token,
                 litellm_api_key = excluded.litellm_api_key,
                 openrouter_api_key = excluded.openrouter_api_key,
                 litellm_base_url = excluded.litellm_base_url,
                 default_provider = excluded.default_provider,
                 default_model = excluded.default_model,
                 updated_at = excluded.updated_at",
        )
        .bind(settings.user_id.to_string())
        .bind(key(ProviderKind::OpenAi))
        .bind(key(ProviderKind::HuggingFace))
        .bind(key(ProviderKind::Github))
        .bind(key(ProviderKind::LiteLlm))
        .bind(key(ProviderKind::OpenRouter))
        .bind(&settings.litellm_base_url)
        .bind(settings.default_provider.map(|p| p.to_string()))
        .bind(&settings.default_model)
        .bind(format_datetime(&settings.updated_at))
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;
        Ok(())
    }
}
