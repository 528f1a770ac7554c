//! Tool CRUD handlers. Every query is scoped to the caller.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use agentforge_types::id::ToolId;
use agentforge_types::tool::{CreateToolRequest, Tool, UpdateToolRequest};

use crate::http::error::AppError;
use crate::http::extractors::auth::AuthUser;
use crate::http::extractors::json::ApiJson;
use crate::http::handlers::parse_id;
use crate::state::AppState;

/// POST /api/tools
pub async fn create_tool(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(body): ApiJson<CreateToolRequest>,
) -> Result<(StatusCode, Json<Tool>), AppError> {
    let tool = state.tools.create(&auth.user.id, body).await?;
    Ok((StatusCode::CREATED, Json(tool)))
}

/// GET /api/tools - Newest first.
pub async fn list_tools(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<Tool>>, AppError> {
    Ok(Json(state.tools.list(&auth.user.id).await?))
}

/// GET /api/tools/{id}
pub async fn get_tool(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Tool>, AppError> {
    let id: ToolId = parse_id(&id, "tool")?;
    Ok(Json(state.tools.get(&auth.user.id, &id).await?))
}

/// PUT /api/tools/{id}
pub async fn update_tool(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<UpdateToolRequest>,
) -> Result<Json<Tool>, AppError> {
    let id: ToolId = parse_id(&id, "tool")?;
    Ok(Json(state.tools.update(&auth.user.id, &id, body).await?))
}

/// DELETE /api/tools/{id}
pub async fn delete_tool(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id: ToolId = parse_id(&id, "tool")?;
    state.tools.delete(&auth.user.id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
