//! Axum router configuration with middleware.
//!
//! Public routes: `/health`, signup/register/login and the OAuth redirects.
//! Everything else under `/api` authenticates through the bearer-token
//! extractors. Middleware: per-IP rate limit on `/api`, CORS, tracing and
//! security headers.

use axum::Router;
use axum::http::HeaderValue;
use axum::http::header::{REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS};
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::http::rate_limit::limit_by_ip;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Accounts
        .route("/signup", post(handlers::auth::signup))
        .route("/register", post(handlers::auth::signup))
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .route("/me", get(handlers::auth::me))
        // OAuth
        .route("/auth/{provider}", get(handlers::oauth::start))
        .route("/auth/{provider}/callback", get(handlers::oauth::callback))
        // Menu
        .route("/generate-menu", post(handlers::menu::generate_menu))
        // Agents
        .route(
            "/agents",
            get(handlers::agent::list_agents).post(handlers::agent::create_agent),
        )
        .route(
            "/agents/{id}",
            get(handlers::agent::get_agent)
                .put(handlers::agent::update_agent)
                .delete(handlers::agent::delete_agent),
        )
        // Tools
        .route(
            "/tools",
            get(handlers::tool::list_tools).post(handlers::tool::create_tool),
        )
        .route(
            "/tools/{id}",
            get(handlers::tool::get_tool)
                .put(handlers::tool::update_tool)
                .delete(handlers::tool::delete_tool),
        )
        // Settings
        .route(
            "/user/settings",
            get(handlers::setting::get_settings)
                .post(handlers::setting::update_settings)
                .put(handlers::setting::update_settings),
        )
        // Problems
        .route("/solve-problem", post(handlers::problem::solve_problem))
        .route("/problems", get(handlers::problem::list_problems))
        // Assist
        .route("/analyze-error", post(handlers::assist::analyze_error))
        .route(
            "/generate-suggestion",
            post(handlers::assist::generate_suggestion),
        )
        .route("/ai-interaction", post(handlers::assist::ai_interaction))
        .route("/scan-for-errors", post(handlers::assist::scan_for_errors))
        // Admin
        .route(
            "/admin/settings",
            get(handlers::admin::get_settings).post(handlers::admin::update_settings),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), limit_by_ip));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .layer(SetResponseHeaderLayer::if_not_present(
            X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint (no auth required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
