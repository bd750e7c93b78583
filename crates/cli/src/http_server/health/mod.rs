use axum::routing::get;
use axum::Router;

mod liveness;
mod version;

use crate::UiState;

pub fn router(state: UiState) -> Router<UiState> {
    Router::new()
        .route("/livez", get(liveness::handler))
        .route("/version", get(version::handler))
        .with_state(state)
}
