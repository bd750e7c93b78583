use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::http_server::error::DashboardError;
use crate::http_server::session::CurrentSession;
use crate::UiState;

/// PNGs render inline; everything else is served as raw bytes for the
/// in-page viewers.
fn content_type(key: &str) -> &'static str {
    if key.ends_with(".png") {
        "image/png"
    } else {
        "application/octet-stream"
    }
}

pub async fn handler(
    State(state): State<UiState>,
    current: CurrentSession,
    Path(key): Path<String>,
) -> Result<Response, DashboardError> {
    let storage = super::storage(&state, &current).await?;
    let data = storage.get(&key).await?;
    Ok(([(header::CONTENT_TYPE, content_type(&key))], data).into_response())
}
