//! SQLite user repository implementation.

use chrono::Utc;
use sqlx::Row;

use agentforge_core::repository::user::UserRepository;
use agentforge_types::error::RepositoryError;
use agentforge_types::id::UserId;
use agentforge_types::user::{OAuthProvider, User, UserRole};

use super::pool::DatabasePool;
use super::{format_datetime, is_unique_violation, parse_datetime, query_error};

/// SQLite-backed implementation of `UserRepository`.
pub struct SqliteUserRepository {
    pool: DatabasePool,
}

impl SqliteUserRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct UserRow {
    id: String,
    email: String,
    password_hash: Option<String>,
    role: String,
    created_at: String,
    updated_at: String,
}

impl UserRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            role: row.try_get("role")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_user(self) -> Result<User, RepositoryError> {
        let id = self
            .id
            .parse::<UserId>()
            .map_err(|e| RepositoryError::Query(format!("invalid user id: {e}")))?;
        let role: UserRole = self.role.parse().map_err(RepositoryError::Query)?;

        Ok(User {
            id,
            email: self.email,
            password_hash: self.password_hash,
            role,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

fn map_user(row: Option<sqlx::sqlite::SqliteRow>) -> Result<Option<User>, RepositoryError> {
    row.map(|row| UserRow::from_row(&row).map_err(query_error)?.into_user())
        .transpose()
}

impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: &User) -> Result<User, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO users (id, email, password_hash, role, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.to_string())
        .bind(format_datetime(&user.created_at))
        .bind(format_datetime(&user.updated_at))
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => Ok(user.clone()),
            Err(e) if is_unique_violation(&e) => Err(RepositoryError::Conflict(format!(
                "email '{}' already registered",
                user.email
            ))),
            Err(e) => Err(query_error(e)),
        }
    }

    async fn get_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;
        map_user(row)
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;
        map_user(row)
    }

    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM users ORDER BY created_at ASC")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;
        rows.iter()
            .map(|row| UserRow::from_row(row).map_err(query_error)?.into_user())
            .collect()
    }

    async fn set_role(&self, id: &UserId, role: UserRole) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE users SET role = ?, updated_at = ? WHERE id = ?")
            .bind(role.to_string())
            .bind(format_datetime(&Utc::now()))
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(query_error)?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn link_identity(
        &self,
        provider: OAuthProvider,
        subject: &str,
        user_id: &UserId,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO oauth_identities (provider, subject, user_id, created_at) VALUES (?, ?, ?, ?)
             ON CONFLICT(provider, subject) DO UPDATE SET user_id = excluded.user_id",
        )
        .bind(provider.to_string())
        .bind(subject)
        .bind(user_id.to_string())
        .bind(format_datetime(&Utc::now()))
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;
        Ok(())
    }

    async fn find_by_identity(
        &self,
        provider: OAuthProvider,
        subject: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query(
            "SELECT u.* FROM users u
             JOIN oauth_identities i ON i.user_id = u.id
             WHERE i.provider = ? AND i.subject = ?",
        )
        .bind(provider.to_string())
        .bind(subject)
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(query_error)?;
        map_user(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::test_support::{make_user, test_pool};

    #[tokio::test]
    async fn test_create_and_lookup() {
        let repo = SqliteUserRepository::new(test_pool().await);
        let user = make_user("ada@example.com");
        repo.create(&user).await.unwrap();

        let by_id = repo.get_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "ada@example.com");
        assert_eq!(by_id.role, UserRole::User);

        let by_email = repo.get_by_email("ada@example.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, user.id);
        assert!(repo.get_by_email("bob@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let repo = SqliteUserRepository::new(test_pool().await);
        repo.create(&make_user("ada@example.com")).await.unwrap();
        let err = repo.create(&make_user("ada@example.com")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_set_role() {
        let repo = SqliteUserRepository::new(test_pool().await);
        let user = make_user("ada@example.com");
        repo.create(&user).await.unwrap();

        repo.set_role(&user.id, UserRole::Admin).await.unwrap();
        assert!(repo.get_by_id(&user.id).await.unwrap().unwrap().is_admin());
        assert!(matches!(
            repo.set_role(&UserId::new(), UserRole::Admin).await,
            Err(RepositoryError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_identity_link() {
        let repo = SqliteUserRepository::new(test_pool().await);
        let mut user = make_user("grace@example.com");
        user.password_hash = None;
        repo.create(&user).await.unwrap();

        repo.link_identity(OAuthProvider::Github, "42", &user.id).await.unwrap();
        let found = repo
            .find_by_identity(OAuthProvider::Github, "42")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, user.id);
        assert!(found.password_hash.is_none());
        assert!(
            repo.find_by_identity(OAuthProvider::Google, "42")
                .await
                .unwrap()
                .is_none()
        );
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }
}
