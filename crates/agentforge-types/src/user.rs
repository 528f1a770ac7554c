use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::id::UserId;

/// A registered AgentForge account.
///
/// `password_hash` is an argon2id PHC string; it is `None` for accounts
/// created through OAuth sign-in that never set a password.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    /// Normalized (trimmed, lowercase) email, unique across users.
    pub email: String,
    pub password_hash: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// The public view of this user, safe to return over the API.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id.clone(),
            email: self.email.clone(),
            role: self.role,
            created_at: self.created_at,
        }
    }
}

/// Account role. Admins may read and change server-level settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::User => write!(f, "user"),
            UserRole::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(UserRole::User),
            "admin" => Ok(UserRole::Admin),
            other => Err(format!("invalid user role: '{other}'")),
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::User
    }
}

/// User fields exposed through the API (never includes the password hash).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/signup` and `POST /api/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Successful signup/login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    /// Bearer token to echo as `Authorization: Bearer <token>`.
    pub token: String,
    pub user_id: UserId,
    pub user: UserProfile,
    pub expires_at: DateTime<Utc>,
}

/// A stored bearer token. Only the SHA-256 digest of the token is persisted.
#[derive(Debug, Clone)]
pub struct AuthToken {
    pub id: crate::id::TokenId,
    pub user_id: UserId,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AuthToken {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// External identity providers supported for sign-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OAuthProvider {
    Github,
    Google,
}

impl fmt::Display for OAuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OAuthProvider::Github => write!(f, "github"),
            OAuthProvider::Google => write!(f, "google"),
        }
    }
}

impl FromStr for OAuthProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "github" => Ok(OAuthProvider::Github),
            "google" => Ok(OAuthProvider::Google),
            other => Err(format!("unsupported oauth provider: '{other}'")),
        }
    }
}

/// Profile returned by an OAuth provider after a successful code exchange.
#[derive(Debug, Clone)]
pub struct OAuthProfile {
    pub provider: OAuthProvider,
    /// Provider-scoped stable account id.
    pub subject: String,
    pub email: String,
}

/// Normalize an email for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
