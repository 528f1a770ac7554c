//! Account handlers: signup, login, logout and the current user.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use agentforge_types::user::{AuthSession, Credentials, UserProfile};

use crate::http::error::AppError;
use crate::http::extractors::auth::AuthUser;
use crate::http::extractors::json::ApiJson;
use crate::state::AppState;

/// POST /api/signup (alias /api/register) - Register and sign in.
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Credentials>,
) -> Result<(StatusCode, Json<AuthSession>), AppError> {
    let session = state.auth.signup(&body.email, &body.password).await?;
    tracing::info!(user_id = %session.user_id, "user signed up");
    Ok((StatusCode::CREATED, Json(session)))
}

/// POST /api/login - Exchange email and password for a bearer token.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Credentials>,
) -> Result<Json<AuthSession>, AppError> {
    let session = state.auth.login(&body.email, &body.password).await?;
    Ok(Json(session))
}

/// POST /api/logout - Revoke the presented token.
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<StatusCode, AppError> {
    state.auth.logout(&auth.token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/me - The signed-in user.
pub async fn me(auth: AuthUser) -> Json<UserProfile> {
    Json(auth.user.profile())
}
