//! Client error log: deduplicates error reports from the UI.

use chrono::Utc;

use agentforge_types::assist::ClientError;
use agentforge_types::error::GenerationError;
use agentforge_types::id::UserId;

use crate::repository::error_log::ErrorLogRepository;
use crate::service::hash::ContentHasher;

pub struct ErrorLogService<E: ErrorLogRepository, H: ContentHasher> {
    repo: E,
    hasher: H,
}

impl<E: ErrorLogRepository, H: ContentHasher> ErrorLogService<E, H> {
    pub fn new(repo: E, hasher: H) -> Self {
        Self { repo, hasher }
    }

    /// Record each reported error and return the ones this user never
    /// reported before. Blank messages are ignored; duplicates within one
    /// batch count once.
    pub async fn scan(
        &self,
        user_id: &UserId,
        errors: Vec<ClientError>,
    ) -> Result<Vec<ClientError>, GenerationError> {
        let now = Utc::now();
        let mut fresh = Vec::new();
        for error in errors {
            let message = error.message.trim();
            if message.is_empty() {
                continue;
            }
            let fingerprint = self.hasher.compute_hash(message);
            let first_seen = self
                .repo
                .record(user_id, &fingerprint, message, now)
                .await
                .map_err(|e| GenerationError::StorageError(e.to_string()))?;
            if first_seen {
                fresh.push(error);
            }
        }
        if !fresh.is_empty() {
            tracing::info!(user_id = %user_id, count = fresh.len(), "new client errors reported");
        }
        Ok(fresh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeHasher, MemoryErrorLogRepository};

    fn error(message: &str) -> ClientError {
        ClientError {
            message: message.into(),
            stack: None,
            extra: Default::default(),
        }
    }

    #[tokio::test]
    async fn test_reports_each_message_once() {
        let svc = ErrorLogService::new(MemoryErrorLogRepository::default(), FakeHasher);
        let user = UserId::new();

        let first = svc
            .scan(&user, vec![error("x is undefined"), error(" x is undefined "), error("")])
            .await
            .unwrap();
        assert_eq!(first.len(), 1);

        let second = svc
            .scan(&user, vec![error("x is undefined"), error("network down")])
            .await
            .unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].message, "network down");
    }

    #[tokio::test]
    async fn test_dedupe_is_per_user() {
        let svc = ErrorLogService::new(MemoryErrorLogRepository::default(), FakeHasher);
        svc.scan(&UserId::new(), vec![error("boom")]).await.unwrap();
        let other = svc.scan(&UserId::new(), vec![error("boom")]).await.unwrap();
        assert_eq!(other.len(), 1);
    }
}
