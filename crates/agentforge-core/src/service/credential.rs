//! Credential primitives used by the auth and settings services.
//!
//! Concrete adapters (argon2, AES-256-GCM, OS randomness) live in
//! agentforge-infra.

use agentforge_types::error::{AuthError, SettingError};

/// One-way password hashing.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into a self-describing (PHC) string.
    fn hash_password(&self, password: &str) -> Result<String, AuthError>;

    /// Check a plaintext password against a stored hash.
    fn verify_password(&self, password: &str, hash: &str) -> bool;
}

/// Source of fresh opaque bearer tokens.
pub trait TokenMinter: Send + Sync {
    fn mint(&self) -> String;
}

/// Reversible encryption of secrets at rest.
pub trait SecretCipher: Send + Sync {
    /// Encrypt a plaintext into a printable sealed form.
    fn seal(&self, plaintext: &str) -> Result<String, SettingError>;

    /// Reverse [`SecretCipher::seal`].
    fn open(&self, sealed: &str) -> Result<String, SettingError>;
}
