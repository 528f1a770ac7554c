//! Per-user settings handlers.

use axum::Json;
use axum::extract::State;

use agentforge_types::setting::{SettingsView, UpdateSettingsRequest};

use crate::http::error::AppError;
use crate::http::extractors::auth::AuthUser;
use crate::http::extractors::json::ApiJson;
use crate::state::AppState;

/// GET /api/user/settings - Settings with every key masked.
pub async fn get_settings(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<SettingsView>, AppError> {
    Ok(Json(state.settings.view(&auth.user.id).await?))
}

/// POST|PUT /api/user/settings - Partial update.
pub async fn update_settings(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(body): ApiJson<UpdateSettingsRequest>,
) -> Result<Json<SettingsView>, AppError> {
    Ok(Json(state.settings.update(&auth.user.id, &body).await?))
}
