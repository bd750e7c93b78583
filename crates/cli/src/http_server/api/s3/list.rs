use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::http_server::error::DashboardError;
use crate::http_server::session::CurrentSession;
use crate::UiState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub prefix: String,
}

pub async fn handler(
    State(state): State<UiState>,
    current: CurrentSession,
    Query(query): Query<ListQuery>,
) -> Result<Response, DashboardError> {
    let storage = super::storage(&state, &current).await?;
    let listing = storage.list(&query.prefix).await?;
    Ok(Json(listing).into_response())
}
