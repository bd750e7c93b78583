use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::http_server::error::DashboardError;
use crate::http_server::session::CurrentSession;
use crate::UiState;

/// Total bucket size and object count, served from the stats cache
/// while fresh.
pub async fn handler(
    State(state): State<UiState>,
    current: CurrentSession,
) -> Result<Response, DashboardError> {
    let project = current.session.project_name();
    if let Some(stats) = state.stats().get(project) {
        return Ok(Json(stats).into_response());
    }

    let storage = super::storage(&state, &current).await?;
    let stats = storage.bucket_size().await?;
    tracing::debug!(project, total_objects = stats.total_objects, "computed bucket size");
    state.stats().insert(project, stats);

    Ok(Json(stats).into_response())
}

pub async fn invalidate_handler(
    State(state): State<UiState>,
    current: CurrentSession,
) -> Response {
    state.stats().invalidate(current.session.project_name());
    Json(json!({"message": "Bucket size cache cleared."})).into_response()
}
