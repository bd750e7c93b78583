use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use tracing::instrument;
use url::form_urlencoded;

use common::auth;

use crate::http_server::session::{session_cookie, session_id};
use crate::state::DashboardSession;
use crate::UiState;

fn back_to_index(message: &str) -> Response {
    let query: String = form_urlencoded::Serializer::new(String::new())
        .append_pair("error", message)
        .finish();
    Redirect::to(&format!("/?{}", query)).into_response()
}

/// Log into `project_name` with its stored credentials and start a
/// dashboard session.
#[instrument(skip(state, jar))]
pub async fn handler(
    State(state): State<UiState>,
    jar: CookieJar,
    Path(project_name): Path<String>,
) -> Response {
    let project = match state.config().project(&project_name) {
        Ok(project) => project,
        Err(e) => {
            tracing::warn!(error = %e, "unknown project selected");
            return back_to_index(&e.to_string());
        }
    };

    let Some(password) = project.password.clone() else {
        return back_to_index(&format!(
            "Project '{}' has no stored password. Run 'epic init {}' from a terminal instead.",
            project_name, project_name
        ));
    };

    let token = match auth::login(&project, &password).await {
        Ok(token) => token,
        Err(e) => {
            tracing::warn!(error = %e, project = %project_name, "dashboard login failed");
            return back_to_index(&e.to_string());
        }
    };

    // Switching projects replaces the previous session
    if let Some(previous) = session_id(&jar) {
        state.logout(&previous);
    }

    let id = state.login(DashboardSession::new(project, token.id_token));
    tracing::info!(project = %project_name, "dashboard session started");

    (jar.add(session_cookie(id)), Redirect::to("/dashboard")).into_response()
}
