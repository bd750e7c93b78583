use askama::Template;
use askama_axum::IntoResponse;
use axum::response::{Redirect, Response};
use tracing::instrument;

use crate::http_server::session::CurrentSession;

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub project_name: String,
    pub username: String,
}

#[instrument(skip(current))]
pub async fn handler(current: Option<CurrentSession>) -> Response {
    match current {
        Some(CurrentSession { session, .. }) => DashboardTemplate {
            project_name: session.project_name().to_string(),
            username: session.username,
        }
        .into_response(),
        None => Redirect::to("/").into_response(),
    }
}
