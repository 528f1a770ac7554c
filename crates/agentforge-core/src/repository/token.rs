//! Bearer token repository trait definition.

use chrono::{DateTime, Utc};

use agentforge_types::error::RepositoryError;
use agentforge_types::user::AuthToken;

/// Repository trait for issued bearer tokens. Tokens are addressed by the
/// SHA-256 digest of their plaintext.
pub trait TokenRepository: Send + Sync {
    fn create(
        &self,
        token: &AuthToken,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    fn get_by_hash(
        &self,
        token_hash: &str,
    ) -> impl std::future::Future<Output = Result<Option<AuthToken>, RepositoryError>> + Send;

    /// Revoke a token. Returns whether a row was removed.
    fn delete_by_hash(
        &self,
        token_hash: &str,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// Remove every token that expired at or before `now`. Returns the count.
    fn delete_expired(
        &self,
        now: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
