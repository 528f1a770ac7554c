//! HTTP/REST API layer for AgentForge.
//!
//! Axum-based REST API under `/api/` with bearer-token authentication,
//! `{error, message}` error bodies, CORS, security headers and a per-IP
//! rate limit.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod oauth_state;
pub mod rate_limit;
pub mod router;
