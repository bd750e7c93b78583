use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::instrument;

use crate::UiState;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub projects: Vec<String>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    pub error: Option<String>,
}

#[instrument(skip(state))]
pub async fn handler(
    State(state): State<UiState>,
    Query(query): Query<IndexQuery>,
) -> askama_axum::Response {
    let (projects, error) = match state.project_names() {
        Ok(projects) => (projects, query.error),
        Err(e) => {
            tracing::error!(error = %e, "failed to read project config");
            (Vec::new(), Some(e.to_string()))
        }
    };

    IndexTemplate { projects, error }.into_response()
}
