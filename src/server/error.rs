use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failure of an inbound request, rendered as `{"error": ..., "code": ...}`
#[derive(Debug, Error)]
pub enum ApiError {
    /// Required path value missing or a query value is invalid
    #[error("{0}")]
    BadRequest(String),

    /// No credential could be resolved for the request
    #[error("Authentication error: {0}")]
    Unauthorized(String),

    /// The Graph API call failed (remote error, transport or decode)
    #[error("{0}")]
    Upstream(String),

    #[error("Endpoint not found")]
    NotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Failure inside the server itself
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Upstream(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Upstream(msg) => tracing::warn!("upstream failure: {}", msg),
            ApiError::Internal(msg) => tracing::error!("internal error: {}", msg),
            ApiError::Unauthorized(_) => tracing::info!("request rejected: no credential"),
            _ => tracing::debug!("request rejected: {}", self),
        }

        let body = Json(json!({
            "error": self.to_string(),
            "code": status.as_u16(),
        }));
        (status, body).into_response()
    }
}
