//! Settings repository trait definition.

use agentforge_types::error::RepositoryError;
use agentforge_types::id::UserId;
use agentforge_types::setting::UserSettings;

/// Repository trait for per-user settings (one row per user).
pub trait SettingRepository: Send + Sync {
    fn get(
        &self,
        user_id: &UserId,
    ) -> impl std::future::Future<Output = Result<Option<UserSettings>, RepositoryError>> + Send;

    /// Insert or replace the settings row for `settings.user_id`.
    fn upsert(
        &self,
        settings: &UserSettings,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
