//! Mod menu generation.

use axum::Json;
use axum::extract::State;

use agentforge_types::menu::{GenerateMenuRequest, GenerateMenuResponse};

use crate::http::error::AppError;
use crate::http::extractors::auth::AuthUser;
use crate::http::extractors::json::ApiJson;
use crate::state::AppState;

/// POST /api/generate-menu - Generate a mod menu with the chosen provider.
pub async fn generate_menu(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(body): ApiJson<GenerateMenuRequest>,
) -> Result<Json<GenerateMenuResponse>, AppError> {
    let response = state.menu.generate(&auth.user.id, body).await?;
    Ok(Json(response))
}
