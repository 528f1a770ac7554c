//! JSON body extractor whose rejections use the API error body.

use axum::extract::FromRequest;

use crate::http::error::AppError;

/// Like [`axum::Json`], but a malformed or mistyped body becomes a 400
/// `VALIDATION_ERROR` instead of axum's plain-text rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

