use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use common::prelude::{ApiError, StorageError};

/// Failures surfaced to the dashboard's JavaScript as `{"error": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("Not logged in")]
    NotLoggedIn,
    #[error("{0}")]
    BadRequest(String),
    #[error("No such endpoint: {0}")]
    UnknownEndpoint(String),
    #[error("API request failed: {0}")]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl DashboardError {
    pub fn missing(fields: &str) -> Self {
        Self::BadRequest(format!("Missing {}", fields))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotLoggedIn => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::UnknownEndpoint(_) => StatusCode::NOT_FOUND,
            Self::Api(ApiError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Api(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Storage(StorageError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Storage(StorageError::InvalidKey { .. }) => StatusCode::BAD_REQUEST,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Storage(StorageError::NotFound(_)) => "File not found".to_string(),
            Self::Storage(StorageError::Credentials(e)) => {
                format!("Failed to get S3 credentials from API: {}", e)
            }
            other => other.to_string(),
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "dashboard request failed");
        }
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
