//! SQLite bearer-token repository implementation.

use chrono::{DateTime, Utc};
use sqlx::Row;

use agentforge_core::repository::token::TokenRepository;
use agentforge_types::error::RepositoryError;
use agentforge_types::id::{TokenId, UserId};
use agentforge_types::user::AuthToken;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime, query_error};

pub struct SqliteTokenRepository {
    pool: DatabasePool,
}

impl SqliteTokenRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn token_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<AuthToken, RepositoryError> {
    let id: String = row.try_get("id").map_err(query_error)?;
    let user_id: String = row.try_get("user_id").map_err(query_error)?;
    let created_at: String = row.try_get("created_at").map_err(query_error)?;
    let expires_at: String = row.try_get("expires_at").map_err(query_error)?;

    Ok(AuthToken {
        id: id
            .parse::<TokenId>()
            .map_err(|e| RepositoryError::Query(format!("invalid token id: {e}")))?,
        user_id: user_id
            .parse::<UserId>()
            .map_err(|e| RepositoryError::Query(format!("invalid user id: {e}")))?,
        token_hash: row.try_get("token_hash").map_err(query_error)?,
        created_at: parse_datetime(&created_at)?,
        expires_at: parse_datetime(&expires_at)?,
    })
}

impl TokenRepository for SqliteTokenRepository {
    async fn create(&self, token: &AuthToken) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO auth_tokens (id, user_id, token_hash, created_at, expires_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(token.id.to_string())
        .bind(token.user_id.to_string())
        .bind(&token.token_hash)
        .bind(format_datetime(&token.created_at))
        .bind(format_datetime(&token.expires_at))
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;
        Ok(())
    }

    async fn get_by_hash(&self, token_hash: &str) -> Result<Option<AuthToken>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM auth_tokens WHERE token_hash = ?")
            .bind(token_hash)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;
        row.as_ref().map(token_from_row).transpose()
    }

    async fn delete_by_hash(&self, token_hash: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM auth_tokens WHERE token_hash = ?")
            .bind(token_hash)
            .execute(&self.pool.writer)
            .await
            .map_err(query_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, RepositoryError> {
        // Timestamps are all UTC RFC 3339 with the same offset suffix, so
        // lexicographic order matches chronological order.
        let result = sqlx::query("DELETE FROM auth_tokens WHERE expires_at <= ?")
            .bind(format_datetime(&now))
            .execute(&self.pool.writer)
            .await
            .map_err(query_error)?;
        Ok(result.rows_affected())
    }
}
