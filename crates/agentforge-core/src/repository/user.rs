//! User and linked-identity repository trait definitions.

use agentforge_types::error::RepositoryError;
use agentforge_types::id::UserId;
use agentforge_types::user::{OAuthProvider, User, UserRole};

/// Repository trait for user accounts.
///
/// Implementations live in agentforge-infra (e.g., SqliteUserRepository).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait UserRepository: Send + Sync {
    /// Create a new user. Returns `RepositoryError::Conflict` when the email
    /// is already registered.
    fn create(
        &self,
        user: &User,
    ) -> impl std::future::Future<Output = Result<User, RepositoryError>> + Send;

    fn get_by_id(
        &self,
        id: &UserId,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// Look up a user by normalized email.
    fn get_by_email(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// All users, oldest first.
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<User>, RepositoryError>> + Send;

    fn set_role(
        &self,
        id: &UserId,
        role: UserRole,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Attach an external identity to a user.
    fn link_identity(
        &self,
        provider: OAuthProvider,
        subject: &str,
        user_id: &UserId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Find the user an external identity is linked to.
    fn find_by_identity(
        &self,
        provider: OAuthProvider,
        subject: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;
}
