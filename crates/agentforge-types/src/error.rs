use thiserror::Error;

use crate::llm::LlmError;
use crate::provider::ProviderKind;

/// Errors related to accounts, passwords and bearer tokens.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid email address")]
    InvalidEmail,

    #[error("password must be at least {0} characters")]
    WeakPassword(usize),

    #[error("a user with this email already exists")]
    EmailTaken,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("invalid or expired token")]
    InvalidToken,

    #[error("user not found")]
    UserNotFound,

    #[error("password hashing failed")]
    Hashing,

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors related to agent, tool and problem records.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors related to per-user settings.
#[derive(Debug, Error)]
pub enum SettingError {
    #[error("{0}")]
    InvalidProvider(String),

    #[error("no API key configured for provider '{0}'")]
    MissingApiKey(ProviderKind),

    #[error("stored key could not be decrypted")]
    Decryption,

    #[error("key could not be encrypted")]
    Encryption,

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors from LLM-backed operations (menu generation, problem solving,
/// helper endpoints).
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("{0}")]
    Validation(String),

    #[error("no provider selected and no default provider configured")]
    NoProvider,

    #[error(transparent)]
    Setting(#[from] SettingError),

    #[error("provider call failed: {0}")]
    Provider(#[from] LlmError),

    #[error("provider returned a malformed response: {0}")]
    Malformed(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors from the admin settings panel.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("invalid server port: '{0}'")]
    InvalidPort(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors from repository operations (used by trait definitions in agentforge-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        assert_eq!(
            AuthError::WeakPassword(8).to_string(),
            "password must be at least 8 characters"
        );
    }

    #[test]
    fn test_missing_key_names_provider() {
        let err = SettingError::MissingApiKey(ProviderKind::OpenRouter);
        assert!(err.to_string().contains("openrouter"));
    }

    #[test]
    fn test_generation_error_from_llm() {
        let err: GenerationError = LlmError::AuthenticationFailed.into();
        assert!(matches!(err, GenerationError::Provider(LlmError::AuthenticationFailed)));
    }

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }
}
