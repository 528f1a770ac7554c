//! Problem solving and the problem log.

use axum::Json;
use axum::extract::State;

use agentforge_types::problem::{Problem, SolveProblemRequest, SolveProblemResponse};

use crate::http::error::AppError;
use crate::http::extractors::auth::AuthUser;
use crate::http::extractors::json::ApiJson;
use crate::state::AppState;

/// POST /api/solve-problem
pub async fn solve_problem(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(body): ApiJson<SolveProblemRequest>,
) -> Result<Json<SolveProblemResponse>, AppError> {
    Ok(Json(state.problems.solve(&auth.user.id, body).await?))
}

/// GET /api/problems - Newest first.
pub async fn list_problems(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<Problem>>, AppError> {
    Ok(Json(state.problems.list(&auth.user.id).await?))
}
