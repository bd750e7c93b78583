use axum::routing::{get, post};
use axum::Router;

mod billing;
mod jobs;
pub mod s3;

use crate::UiState;

pub fn router(state: UiState) -> Router<UiState> {
    Router::new()
        .route("/billing", get(billing::handler))
        .route("/jobs", get(jobs::list_handler))
        .route("/cancel_job/:job_uuid", post(jobs::cancel_handler))
        .route("/job/:job_uuid/tail", get(jobs::tail_handler))
        .nest("/s3", s3::router(state.clone()))
        .with_state(state)
}
