//! SQLite client error log repository implementation.

use chrono::{DateTime, Utc};

use agentforge_core::repository::error_log::ErrorLogRepository;
use agentforge_types::error::RepositoryError;
use agentforge_types::id::UserId;

use super::pool::DatabasePool;
use super::{format_datetime, query_error};

pub struct SqliteErrorLogRepository {
    pool: DatabasePool,
}

impl SqliteErrorLogRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl ErrorLogRepository for SqliteErrorLogRepository {
    async fn record(
        &self,
        user_id: &UserId,
        fingerprint: &str,
        message: &str,
        seen_at: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        let seen_at = format_datetime(&seen_at);
        let (occurrences,): (i64,) = sqlx::query_as(
            "INSERT INTO client_errors (user_id, fingerprint, message, first_seen_at, last_seen_at, occurrences)
             VALUES (?, ?, ?, ?, ?, 1)
             ON CONFLICT(user_id, fingerprint) DO UPDATE SET
                 occurrences = occurrences + 1,
                 last_seen_at = excluded.last_seen_at
             RETURNING occurrences",
        )
        .bind(user_id.to_string())
        .bind(fingerprint)
        .bind(message)
        .bind(&seen_at)
        .bind(&seen_at)
        .fetch_one(&self.pool.writer)
        .await
        .map_err(query_error)?;
        Ok(occurrences == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::test_support::{insert_user, test_pool};

    #[tokio::test]
    async fn test_first_sighting_only() {
        let pool = test_pool().await;
        let user = insert_user(&pool, "ada@example.com").await;
        let other = insert_user(&pool, "bob@example.com").await;
        let repo = SqliteErrorLogRepository::new(pool.clone());
        let now = Utc::now();

        assert!(repo.record(&user, "fp1", "boom", now).await.unwrap());
        assert!(!repo.record(&user, "fp1", "boom", now).await.unwrap());
        assert!(repo.record(&other, "fp1", "boom", now).await.unwrap());

        let (count,): (i64,) = sqlx::query_as(
            "SELECT occurrences FROM client_errors WHERE user_id = ? AND fingerprint = 'fp1'",
        )
        .bind(user.to_string())
        .fetch_one(&pool.reader)
        .await
        .unwrap();
        assert_eq!(count, 2);
    }
}
