//! Bearer-token authentication extractors.
//!
//! Reads `Authorization: Bearer <token>`, hashes the token and resolves it to
//! a user through the auth service. Missing, unknown and expired tokens are
//! all rejected with 401.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use agentforge_types::user::User;

use crate::http::error::AppError;
use crate::state::AppState;

/// The signed-in caller.
pub struct AuthUser {
    pub user: User,
    /// The presented bearer token, needed for logout.
    pub token: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let user = state.auth.authenticate(&token).await?;
        Ok(AuthUser { user, token })
    }
}

/// The signed-in caller, required to hold the admin role.
pub struct AdminUser(pub User);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser { user, .. } = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            tracing::warn!(user_id = %user.id, "non-admin attempted admin access");
            return Err(AppError::Forbidden("Admin role required".to_string()));
        }
        Ok(AdminUser(user))
    }
}

/// Extract the bearer token from the `Authorization` header.
fn bearer_token(parts: &Parts) -> Result<String, AppError> {
    let header = parts.headers.get(AUTHORIZATION).ok_or_else(|| {
        AppError::Unauthorized(
            "Missing token. Provide it via 'Authorization: Bearer <token>'.".to_string(),
        )
    })?;
    let value = header
        .to_str()
        .map_err(|_| AppError::Unauthorized("Invalid Authorization header encoding".to_string()))?;

    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Authorization must use the Bearer scheme".to_string()))?;
    Ok(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/me");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(&parts_with(Some("Bearer af_abc"))).unwrap(), "af_abc");
        assert!(matches!(bearer_token(&parts_with(None)), Err(AppError::Unauthorized(_))));
        assert!(matches!(
            bearer_token(&parts_with(Some("Basic dXNlcjpwdw=="))),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(bearer_token(&parts_with(Some("Bearer   "))), Err(AppError::Unauthorized(_))));
    }
}
