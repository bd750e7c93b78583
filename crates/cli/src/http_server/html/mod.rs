use axum::routing::get;
use axum::Router;

mod dashboard;
mod index;
mod logout;
mod select_project;

use crate::UiState;

pub fn router(state: UiState) -> Router<UiState> {
    Router::new()
        .route("/", get(index::handler))
        .route("/select_project/:project_name", get(select_project::handler))
        .route("/dashboard", get(dashboard::handler))
        .route("/logout", get(logout::handler))
        .with_state(state)
}
