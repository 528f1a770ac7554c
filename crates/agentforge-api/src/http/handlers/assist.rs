//! LLM helper endpoints behind the UI widgets.

use axum::Json;
use axum::extract::State;

use agentforge_types::assist::{
    AnalyzeErrorRequest, ErrorAnalysis, InteractionRequest, InteractionResponse,
    ScanErrorsRequest, ScanErrorsResponse, SuggestionRequest, SuggestionResponse,
};

use crate::http::error::AppError;
use crate::http::extractors::auth::AuthUser;
use crate::http::extractors::json::ApiJson;
use crate::state::AppState;

/// POST /api/analyze-error - Always 200; falls back to a generic message.
pub async fn analyze_error(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(body): ApiJson<AnalyzeErrorRequest>,
) -> Json<ErrorAnalysis> {
    Json(state.assist.analyze_error(&auth.user.id, body).await)
}

/// POST /api/generate-suggestion
pub async fn generate_suggestion(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(body): ApiJson<SuggestionRequest>,
) -> Result<Json<SuggestionResponse>, AppError> {
    Ok(Json(state.assist.suggest(&auth.user.id, body).await?))
}

/// POST /api/ai-interaction
pub async fn ai_interaction(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(body): ApiJson<InteractionRequest>,
) -> Result<Json<InteractionResponse>, AppError> {
    Ok(Json(state.assist.interact(&auth.user.id, body).await?))
}

/// POST /api/scan-for-errors - Only errors never reported before.
pub async fn scan_for_errors(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(body): ApiJson<ScanErrorsRequest>,
) -> Result<Json<ScanErrorsResponse>, AppError> {
    let new_errors = state.error_log.scan(&auth.user.id, body.errors).await?;
    Ok(Json(ScanErrorsResponse { new_errors }))
}
