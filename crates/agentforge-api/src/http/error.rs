//! Application error type mapping to HTTP status codes and error bodies.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use agentforge_types::error::{AdminError, AuthError, CatalogError, GenerationError, SettingError};
use agentforge_types::llm::LlmError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    Auth(AuthError),
    Catalog(CatalogError),
    Setting(SettingError),
    Generation(GenerationError),
    Admin(AdminError),
    /// Missing or unusable credentials.
    Unauthorized(String),
    /// Authenticated but not allowed.
    Forbidden(String),
    NotFound(String),
    /// Validation error.
    Validation(String),
    /// Per-client request limit exceeded.
    RateLimited { retry_after_secs: u64 },
    /// Upstream identity or model provider failure.
    BadGateway(String),
    /// Generic internal error.
    Internal(String),
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        AppError::Auth(e)
    }
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        AppError::Catalog(e)
    }
}

impl From<SettingError> for AppError {
    fn from(e: SettingError) -> Self {
        AppError::Setting(e)
    }
}

impl From<GenerationError> for AppError {
    fn from(e: GenerationError) -> Self {
        AppError::Generation(e)
    }
}

impl From<AdminError> for AppError {
    fn from(e: AdminError) -> Self {
        AppError::Admin(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

const INTERNAL_MESSAGE: &str = "internal server error";
const PROVIDER_FAILED_MESSAGE: &str = "the model provider request failed";
const PROVIDER_LIMITED_MESSAGE: &str = "the model provider is rate limiting requests, try again later";

fn internal(detail: &str) -> (StatusCode, &'static str, String) {
    tracing::error!(error = detail, "request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}

fn setting_parts(e: &SettingError) -> (StatusCode, &'static str, String) {
    match e {
        SettingError::InvalidProvider(msg) => {
            (StatusCode::BAD_REQUEST, "INVALID_PROVIDER", msg.clone())
        }
        SettingError::MissingApiKey(_) => {
            (StatusCode::BAD_REQUEST, "MISSING_API_KEY", e.to_string())
        }
        SettingError::Decryption | SettingError::Encryption | SettingError::StorageError(_) => {
            internal(&e.to_string())
        }
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Auth(e) => match e {
                AuthError::InvalidEmail | AuthError::WeakPassword(_) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
                }
                AuthError::EmailTaken => (StatusCode::CONFLICT, "EMAIL_TAKEN", e.to_string()),
                AuthError::InvalidCredentials => {
                    (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS", e.to_string())
                }
                AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", e.to_string()),
                AuthError::UserNotFound => (StatusCode::NOT_FOUND, "USER_NOT_FOUND", e.to_string()),
                AuthError::Hashing | AuthError::StorageError(_) => internal(&e.to_string()),
            },
            AppError::Catalog(e) => match e {
                CatalogError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND", e.to_string()),
                CatalogError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CatalogError::StorageError(_) => internal(&e.to_string()),
            },
            AppError::Setting(e) => setting_parts(e),
            AppError::Generation(e) => match e {
                GenerationError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                GenerationError::NoProvider => (StatusCode::BAD_REQUEST, "NO_PROVIDER", e.to_string()),
                GenerationError::Setting(inner) => setting_parts(inner),
                GenerationError::Provider(LlmError::RateLimited) => (
                    StatusCode::TOO_MANY_REQUESTS,
                    "PROVIDER_RATE_LIMITED",
                    PROVIDER_LIMITED_MESSAGE.to_string(),
                ),
                GenerationError::Provider(inner) => {
                    tracing::warn!(error = %inner, "provider call failed");
                    (
                        StatusCode::BAD_GATEWAY,
                        "PROVIDER_ERROR",
                        PROVIDER_FAILED_MESSAGE.to_string(),
                    )
                }
                GenerationError::Malformed(_) => {
                    (StatusCode::BAD_GATEWAY, "MALFORMED_RESPONSE", e.to_string())
                }
                GenerationError::StorageError(_) => internal(&e.to_string()),
            },
            AppError::Admin(e) => match e {
                AdminError::InvalidLogLevel(_) | AdminError::InvalidPort(_) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
                }
                AdminError::StorageError(_) => internal(&e.to_string()),
            },
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::RateLimited { retry_after_secs } => (
                StatusCode::TOO_MANY_REQUESTS,
                "RATE_LIMITED",
                format!("too many requests, retry in {retry_after_secs}s"),
            ),
            AppError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", msg.clone()),
            AppError::Internal(msg) => internal(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        let body = Json(json!({
            "error": code,
            "message": message,
        }));

        match self {
            AppError::RateLimited { retry_after_secs } => (
                status,
                [(axum::http::header::RETRY_AFTER, retry_after_secs.to_string())],
                body,
            )
                .into_response(),
            _ => (status, body).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentforge_types::provider::ProviderKind;

    fn status_and_code(err: AppError) -> (StatusCode, &'static str) {
        let (status, code, _) = err.parts();
        (status, code)
    }

    #[test]
    fn test_auth_errors() {
        assert_eq!(
            status_and_code(AuthError::EmailTaken.into()),
            (StatusCode::CONFLICT, "EMAIL_TAKEN")
        );
        assert_eq!(
            status_and_code(AuthError::InvalidCredentials.into()),
            (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS")
        );
    }

    #[test]
    fn test_provider_errors() {
        let limited: AppError = GenerationError::Provider(LlmError::RateLimited).into();
        assert_eq!(status_and_code(limited).0, StatusCode::TOO_MANY_REQUESTS);

        let auth: AppError = GenerationError::Provider(LlmError::AuthenticationFailed).into();
        assert_eq!(status_and_code(auth).0, StatusCode::BAD_GATEWAY);

        let missing: AppError =
            GenerationError::Setting(SettingError::MissingApiKey(ProviderKind::OpenAi)).into();
        assert_eq!(status_and_code(missing), (StatusCode::BAD_REQUEST, "MISSING_API_KEY"));
    }

    #[test]
    fn test_provider_detail_is_hidden() {
        let upstream = "<html>nginx upstream 10.2.3.4:8443 trace id=abc</html>";
        let (status, code, message) =
            AppError::from(GenerationError::Provider(LlmError::Deserialization(upstream.into())))
                .parts();
        assert_eq!((status, code), (StatusCode::BAD_GATEWAY, "PROVIDER_ERROR"));
        assert_eq!(message, PROVIDER_FAILED_MESSAGE);

        let (_, _, message) = AppError::from(GenerationError::Provider(LlmError::Transport(
            "error sending request for url (https://models.github.ai/inference)".into(),
        )))
        .parts();
        assert!(!message.contains("github.ai"));
    }

    #[test]
    fn test_internal_detail_is_hidden() {
        let (status, _, message) =
            AppError::Catalog(CatalogError::StorageError("disk I/O error at /var/db".into())).parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, INTERNAL_MESSAGE);
    }
}
