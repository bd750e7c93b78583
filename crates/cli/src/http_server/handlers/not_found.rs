use axum::extract::OriginalUri;
use axum::http::{Method, StatusCode};
use axum::response::{Html, IntoResponse, Response};

use crate::http_server::error::DashboardError;
use crate::http_server::API_PREFIX;

const MISSING_PAGE: &str = "<!DOCTYPE html>\
<html><head><title>EPIC</title></head>\
<body><h1>Page not found</h1><p><a href=\"/\">Back to projects</a></p></body></html>";

fn under_api(path: &str) -> bool {
    path.strip_prefix(API_PREFIX)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Router fallback. Misses under `/api` get the JSON error body the
/// dashboard scripts already parse; anything else is a page.
pub async fn not_found_handler(method: Method, OriginalUri(uri): OriginalUri) -> Response {
    let path = uri.path();
    tracing::debug!(%method, path, "no route");

    if under_api(path) {
        return DashboardError::UnknownEndpoint(format!("{} {}", method, path)).into_response();
    }
    (StatusCode::NOT_FOUND, Html(MISSING_PAGE)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_under_api() {
        assert!(under_api("/api"));
        assert!(under_api("/api/s3/nope"));
        assert!(!under_api("/apis"));
        assert!(!under_api("/dashboard"));
    }
}
