//! Agent CRUD handlers. Every query is scoped to the caller.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use agentforge_types::agent::{Agent, CreateAgentRequest, UpdateAgentRequest};
use agentforge_types::id::AgentId;

use crate::http::error::AppError;
use crate::http::extractors::auth::AuthUser;
use crate::http::extractors::json::ApiJson;
use crate::http::handlers::parse_id;
use crate::state::AppState;

/// POST /api/agents
pub async fn create_agent(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(body): ApiJson<CreateAgentRequest>,
) -> Result<(StatusCode, Json<Agent>), AppError> {
    let agent = state.agents.create(&auth.user.id, body).await?;
    Ok((StatusCode::CREATED, Json(agent)))
}

/// GET /api/agents - Newest first.
pub async fn list_agents(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<Agent>>, AppError> {
    Ok(Json(state.agents.list(&auth.user.id).await?))
}

/// GET /api/agents/{id}
pub async fn get_agent(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Agent>, AppError> {
    let id: AgentId = parse_id(&id, "agent")?;
    Ok(Json(state.agents.get(&auth.user.id, &id).await?))
}

/// PUT /api/agents/{id}
pub async fn update_agent(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<UpdateAgentRequest>,
) -> Result<Json<Agent>, AppError> {
    let id: AgentId = parse_id(&id, "agent")?;
    Ok(Json(state.agents.update(&auth.user.id, &id, body).await?))
}

/// DELETE /api/agents/{id}
pub async fn delete_agent(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id: AgentId = parse_id(&id, "agent")?;
    state.agents.delete(&auth.user.id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
