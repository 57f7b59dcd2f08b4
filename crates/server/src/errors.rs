use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use service::{DispatchError, StoreError};

/// Transport view of a dispatcher outcome.
#[derive(Debug)]
pub struct ApiError(pub DispatchError);

impl From<DispatchError> for ApiError {
    fn from(e: DispatchError) -> Self {
        Self(e)
    }
}

impl ApiError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self(DispatchError::InvalidRequest(msg.into()))
    }

    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self.0 {
            DispatchError::NotFound => (StatusCode::NOT_FOUND, "NotFound"),
            DispatchError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "InvalidRequest"),
            DispatchError::Backend(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Backend"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();
        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        }
        let body = serde_json::json!({"error": kind, "message": self.0.to_string()});
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("storage backend unavailable: {0}")]
    Storage(#[from] StoreError),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
