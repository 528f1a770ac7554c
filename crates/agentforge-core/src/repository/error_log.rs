//! Client error log repository trait definition.

use chrono::{DateTime, Utc};

use agentforge_types::error::RepositoryError;
use agentforge_types::id::UserId;

pub trait ErrorLogRepository: Send + Sync {
    /// Record one sighting of a fingerprinted error message.
    ///
    /// Returns `true` when this is the first time the user reported it;
    /// otherwise bumps the occurrence counter and returns `false`.
    fn record(
        &self,
        user_id: &UserId,
        fingerprint: &str,
        message: &str,
        seen_at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;
}
