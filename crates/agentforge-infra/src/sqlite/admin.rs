//! SQLite admin settings key/value repository implementation.

use chrono::Utc;

use agentforge_core::repository::admin::AdminSettingRepository;
use agentforge_types::error::RepositoryError;

use super::pool::DatabasePool;
use super::{format_datetime, query_error};

pub struct SqliteAdminSettingRepository {
    pool: DatabasePool,
}

impl SqliteAdminSettingRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl AdminSettingRepository for SqliteAdminSettingRepository {
    async fn get_all(&self) -> Result<Vec<(String, String)>, RepositoryError> {
        sqlx::query_as("SELECT key, value FROM admin_settings ORDER BY key")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO admin_settings (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(format_datetime(&Utc::now()))
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::test_support::test_pool;

    #[tokio::test]
    async fn test_set_overwrites() {
        let repo = SqliteAdminSettingRepository::new(test_pool().await);
        repo.set("log_level", "info").await.unwrap();
        repo.set("log_level", "debug").await.unwrap();
        repo.set("server_port", "8080").await.unwrap();

        let all = repo.get_all().await.unwrap();
        assert_eq!(
            all,
            vec![
                ("log_level".to_string(), "debug".to_string()),
                ("server_port".to_string(), "8080".to_string()),
            ]
        );
    }
}
