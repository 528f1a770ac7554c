//! GitHub and Google sign-in.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;

use agentforge_infra::oauth::authorize_url;
use agentforge_types::config::OAuthClientConfig;
use agentforge_types::user::OAuthProvider;

use crate::http::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
}

/// GET /api/auth/{provider} - Redirect to the provider's consent page.
pub async fn start(
    State(state): State<AppState>,
    Path(provider): Path<String>,
) -> Result<Redirect, AppError> {
    let (provider, client) = configured(&state, &provider)?;
    let oauth_state = state.oauth_states.issue(provider, Instant::now());
    Ok(Redirect::to(&authorize_url(provider, client, &oauth_state)))
}

/// GET /api/auth/{provider}/callback - Finish sign-in.
pub async fn callback(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Query(query): Query<CallbackQuery>,
) -> Result<Response, AppError> {
    let (provider, client) = configured(&state, &provider)?;

    let valid_state = query
        .state
        .as_deref()
        .is_some_and(|s| state.oauth_states.consume(s, provider, Instant::now()));
    if !valid_state {
        return Err(AppError::Validation("invalid or expired oauth state".into()));
    }
    let code = query
        .code
        .as_deref()
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::Validation("missing authorization code".into()))?;

    let profile = state
        .oauth
        .exchange_code(provider, client, code)
        .await
        .map_err(|e| {
            tracing::warn!(provider = %provider, error = %e, "oauth sign-in failed");
            AppError::BadGateway(format!("{provider} sign-in failed"))
        })?;
    let session = state.auth.oauth_sign_in(&profile).await?;

    Ok(match state.config.oauth.success_redirect.as_deref() {
        Some(target) => Redirect::to(&format!("{target}#token={}", session.token)).into_response(),
        None => Json(session).into_response(),
    })
}

fn configured<'a>(
    state: &'a AppState,
    provider: &str,
) -> Result<(OAuthProvider, &'a OAuthClientConfig), AppError> {
    let not_found = || AppError::NotFound(format!("oauth provider '{provider}' is not configured"));
    let provider: OAuthProvider = provider.parse().map_err(|_| not_found())?;
    let client = state.config.oauth.client(provider).ok_or_else(not_found)?;
    Ok((provider, client))
}
