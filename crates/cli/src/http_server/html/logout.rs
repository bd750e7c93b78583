use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::http_server::session::{session_id, SESSION_COOKIE};
use crate::UiState;

pub async fn handler(State(state): State<UiState>, jar: CookieJar) -> Response {
    if let Some(id) = session_id(&jar) {
        if let Some(session) = state.logout(&id) {
            tracing::info!(project = %session.project_name(), "dashboard session ended");
        }
    }
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Redirect::to("/")).into_response()
}
