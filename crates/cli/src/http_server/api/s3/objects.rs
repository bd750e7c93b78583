use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use super::required;
use crate::http_server::error::DashboardError;
use crate::http_server::session::CurrentSession;
use crate::UiState;

fn message(text: String) -> Response {
    Json(json!({ "message": text })).into_response()
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub key: Option<String>,
}

pub async fn delete_handler(
    State(state): State<UiState>,
    current: CurrentSession,
    Json(req): Json<DeleteRequest>,
) -> Result<Response, DashboardError> {
    let key = required(req.key).ok_or_else(|| DashboardError::missing("file key"))?;

    let storage = super::storage(&state, &current).await?;
    storage.delete(&key).await?;
    state.stats().invalidate(current.session.project_name());

    Ok(message(format!("Successfully deleted {}", key)))
}

#[derive(Debug, Deserialize)]
pub struct RenameRequest {
    pub old_key: Option<String>,
    pub new_key: Option<String>,
}

pub async fn rename_handler(
    State(state): State<UiState>,
    current: CurrentSession,
    Json(req): Json<RenameRequest>,
) -> Result<Response, DashboardError> {
    let (Some(old), Some(new)) = (required(req.old_key), required(req.new_key)) else {
        return Err(DashboardError::missing("old_key or new_key"));
    };

    let storage = super::storage(&state, &current).await?;
    let result = storage.rename(&old, &new).await;
    state.stats().invalidate(current.session.project_name());
    result?;

    Ok(message(format!("Successfully renamed {} to {}", old, new)))
}

#[derive(Debug, Deserialize)]
pub struct CopyRequest {
    pub source_key: Option<String>,
    pub destination_key: Option<String>,
}

pub async fn copy_handler(
    State(state): State<UiState>,
    current: CurrentSession,
    Json(req): Json<CopyRequest>,
) -> Result<Response, DashboardError> {
    let (Some(src), Some(dst)) = (required(req.source_key), required(req.destination_key)) else {
        return Err(DashboardError::missing("source_key or destination_key"));
    };

    let storage = super::storage(&state, &current).await?;
    storage.copy(&src, &dst).await?;
    state.stats().invalidate(current.session.project_name());

    Ok(message(format!("Successfully copied {} to {}", src, dst)))
}
