use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use uuid::Uuid;

use super::error::DashboardError;
use crate::state::DashboardSession;
use crate::UiState;

/// Cookie holding the opaque id of a [`DashboardSession`].
pub const SESSION_COOKIE: &str = "epic_session";

/// The logged-in session for this request. Rejects with 401.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub id: Uuid,
    pub session: DashboardSession,
}

pub fn session_id(jar: &CookieJar) -> Option<Uuid> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
}

pub fn session_cookie(id: Uuid) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

#[async_trait]
impl FromRequestParts<UiState> for CurrentSession {
    type Rejection = DashboardError;

    async fn from_request_parts(parts: &mut Parts, state: &UiState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let id = session_id(&jar).ok_or(DashboardError::NotLoggedIn)?;
        let session = state.session(&id).ok_or(DashboardError::NotLoggedIn)?;
        Ok(Self { id, session })
    }
}
