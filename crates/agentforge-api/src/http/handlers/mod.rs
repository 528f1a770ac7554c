//! HTTP request handlers for the REST API.

pub mod admin;
pub mod agent;
pub mod assist;
pub mod auth;
pub mod menu;
pub mod oauth;
pub mod problem;
pub mod setting;
pub mod tool;

use std::str::FromStr;

use crate::http::error::AppError;

/// Parse a path id, treating a malformed id like an unknown one.
pub(crate) fn parse_id<T: FromStr>(raw: &str, entity: &str) -> Result<T, AppError> {
    raw.parse()
        .map_err(|_| AppError::NotFound(format!("{entity} not found")))
}
