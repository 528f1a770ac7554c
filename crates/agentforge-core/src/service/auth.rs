//! Account and bearer-token service.
//!
//! Passwords are hashed through [`PasswordHasher`]; bearer tokens are minted
//! by [`TokenMinter`] and only their [`ContentHasher`] digest is stored, so a
//! leaked database does not leak usable tokens.

use chrono::{Duration, Utc};

use agentforge_types::error::{AuthError, RepositoryError};
use agentforge_types::id::{TokenId, UserId};
use agentforge_types::user::{
    AuthSession, AuthToken, OAuthProfile, User, UserRole, normalize_email,
};

use crate::repository::token::TokenRepository;
use crate::repository::user::UserRepository;
use crate::service::credential::{PasswordHasher, TokenMinter};
use crate::service::hash::ContentHasher;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

pub struct AuthService<U, T, P, M, H>
where
    U: UserRepository,
    T: TokenRepository,
    P: PasswordHasher,
    M: TokenMinter,
    H: ContentHasher,
{
    users: U,
    tokens: T,
    passwords: P,
    minter: M,
    hasher: H,
    token_ttl: Duration,
}

impl<U, T, P, M, H> AuthService<U, T, P, M, H>
where
    U: UserRepository,
    T: TokenRepository,
    P: PasswordHasher,
    M: TokenMinter,
    H: ContentHasher,
{
    pub fn new(users: U, tokens: T, passwords: P, minter: M, hasher: H, token_ttl_secs: u64) -> Self {
        Self {
            users,
            tokens,
            passwords,
            minter,
            hasher,
            token_ttl: Duration::seconds(token_ttl_secs.min(i64::MAX as u64) as i64),
        }
    }

    /// Register a new account and sign it in.
    pub async fn signup(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let user = self.create_user(email, password, UserRole::User).await?;
        self.issue_token(&user).await
    }

    /// Create an account without issuing a token (used by the CLI).
    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> Result<User, AuthError> {
        let email = validate_email(email)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword(MIN_PASSWORD_LEN));
        }

        let hash = self.passwords.hash_password(password)?;
        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email,
            password_hash: Some(hash),
            role,
            created_at: now,
            updated_at: now,
        };

        let user = self.users.create(&user).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => AuthError::EmailTaken,
            other => storage(other),
        })?;
        tracing::info!(user_id = %user.id, "user account created");
        Ok(user)
    }

    /// Check credentials and issue a token.
    ///
    /// Unknown email, password-less account and wrong password all yield
    /// the same `InvalidCredentials` error.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let email = normalize_email(email);
        let user = self
            .users
            .get_by_email(&email)
            .await
            .map_err(storage)?
            .ok_or(AuthError::InvalidCredentials)?;

        let verified = user
            .password_hash
            .as_deref()
            .is_some_and(|hash| self.passwords.verify_password(password, hash));
        if !verified {
            tracing::debug!(user_id = %user.id, "login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        self.issue_token(&user).await
    }

    /// Mint, store and return a fresh bearer token for `user`.
    pub async fn issue_token(&self, user: &User) -> Result<AuthSession, AuthError> {
        let now = Utc::now();
        if let Err(e) = self.tokens.delete_expired(now).await {
            tracing::warn!(error = %e, "failed to purge expired tokens");
        }

        let token = self.minter.mint();
        let record = AuthToken {
            id: TokenId::new(),
            user_id: user.id.clone(),
            token_hash: self.hasher.compute_hash(&token),
            created_at: now,
            expires_at: now + self.token_ttl,
        };
        self.tokens.create(&record).await.map_err(storage)?;

        Ok(AuthSession {
            token,
            user_id: user.id.clone(),
            user: user.profile(),
            expires_at: record.expires_at,
        })
    }

    /// Resolve a presented bearer token to its user.
    pub async fn authenticate(&self, token: &str) -> Result<User, AuthError> {
        let token_hash = self.hasher.compute_hash(token);
        let record = self
            .tokens
            .get_by_hash(&token_hash)
            .await
            .map_err(storage)?
            .ok_or(AuthError::InvalidToken)?;

        if record.is_expired(Utc::now()) {
            self.tokens.delete_by_hash(&token_hash).await.map_err(storage)?;
            return Err(AuthError::InvalidToken);
        }

        self.users
            .get_by_id(&record.user_id)
            .await
            .map_err(storage)?
            .ok_or(AuthError::InvalidToken)
    }

    /// Revoke a token. Revoking an unknown token is not an error.
    pub async fn logout(&self, token: &str) -> Result<(), AuthError> {
        let token_hash = self.hasher.compute_hash(token);
        self.tokens.delete_by_hash(&token_hash).await.map_err(storage)?;
        Ok(())
    }

    /// Sign in through an external identity.
    ///
    /// An existing link wins; otherwise an account with the same email is
    /// linked; otherwise a password-less account is created and linked.
    pub async fn oauth_sign_in(&self, profile: &OAuthProfile) -> Result<AuthSession, AuthError> {
        if let Some(user) = self
            .users
            .find_by_identity(profile.provider, &profile.subject)
            .await
            .map_err(storage)?
        {
            return self.issue_token(&user).await;
        }

        let email = validate_email(&profile.email)?;
        let user = match self.users.get_by_email(&email).await.map_err(storage)? {
            Some(user) => user,
            None => {
                let now = Utc::now();
                let user = User {
                    id: UserId::new(),
                    email,
                    password_hash: None,
                    role: UserRole::User,
                    created_at: now,
                    updated_at: now,
                };
                self.users.create(&user).await.map_err(storage)?
            }
        };

        self.users
            .link_identity(profile.provider, &profile.subject, &user.id)
            .await
            .map_err(storage)?;
        tracing::info!(user_id = %user.id, provider = %profile.provider, "linked external identity");

        self.issue_token(&user).await
    }

    /// Grant the admin role to the account with `email`.
    pub async fn promote(&self, email: &str) -> Result<User, AuthError> {
        let email = normalize_email(email);
        let mut user = self
            .users
            .get_by_email(&email)
            .await
            .map_err(storage)?
            .ok_or(AuthError::UserNotFound)?;
        self.users
            .set_role(&user.id, UserRole::Admin)
            .await
            .map_err(storage)?;
        user.role = UserRole::Admin;
        Ok(user)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AuthError> {
        self.users.list().await.map_err(storage)
    }
}

fn validate_email(email: &str) -> Result<String, AuthError> {
    let email = normalize_email(email);
    if email.is_empty() || !email.contains('@') {
        return Err(AuthError::InvalidEmail);
    }
    Ok(email)
}

fn storage(e: RepositoryError) -> AuthError {
    AuthError::StorageError(e.to_string())
}
