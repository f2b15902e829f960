//! Extractors whose rejections render like every other `ServiceError`.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::ServiceError;

/// `axum::Json`, but a malformed body is a 400 with an `{"error": ...}` body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ServiceError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Path`, with the same rejection handling as [`AppJson`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ServiceError))]
pub struct AppPath<T>(pub T);
