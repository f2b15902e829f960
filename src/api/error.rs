use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::ServiceError;

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::FORBIDDEN,
            Self::BreedLookup(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ServiceError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

/// Render failures as `{"error": "..."}`.
///
/// Internal errors are logged in full; the client only sees a generic
/// message so database details do not leak.
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            Self::Internal(e) => {
                tracing::error!("Internal error: {:#}", e);
                "Internal server error".to_string()
            }
            Self::BreedLookup(msg) => {
                tracing::error!("Breed lookup failed: {}", msg);
                self.to_string()
            }
            other => {
                tracing::warn!("Request rejected: {}", other);
                other.to_string()
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
