use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use common::prelude::PresignMethod;
use common::storage::DEFAULT_PRESIGN_TTL;

use super::required;
use crate::http_server::error::DashboardError;
use crate::http_server::session::CurrentSession;
use crate::UiState;

#[derive(Debug, Deserialize)]
pub struct PresignRequest {
    pub key: Option<String>,
}

async fn presign(
    state: &UiState,
    current: &CurrentSession,
    req: PresignRequest,
    method: PresignMethod,
) -> Result<Response, DashboardError> {
    let key = required(req.key).ok_or_else(|| DashboardError::missing("file key"))?;
    let storage = super::storage(state, current).await?;
    let url = storage.presign(&key, method, DEFAULT_PRESIGN_TTL).await?;
    Ok(Json(json!({ "url": url })).into_response())
}

pub async fn upload_handler(
    State(state): State<UiState>,
    current: CurrentSession,
    Json(req): Json<PresignRequest>,
) -> Result<Response, DashboardError> {
    presign(&state, &current, req, PresignMethod::Put).await
}

pub async fn download_handler(
    State(state): State<UiState>,
    current: CurrentSession,
    Json(req): Json<PresignRequest>,
) -> Result<Response, DashboardError> {
    presign(&state, &current, req, PresignMethod::Get).await
}
