use axum::routing::{get, post};
use axum::Router;

mod bucket_size;
mod folders;
mod list;
mod objects;
mod presign;
mod view;

use common::prelude::Storage;

use crate::http_server::error::DashboardError;
use crate::http_server::session::CurrentSession;
use crate::UiState;

pub fn router(state: UiState) -> Router<UiState> {
    Router::new()
        .route("/list", get(list::handler))
        .route("/rename-folder", post(folders::rename_handler))
        .route("/copy-folder", post(folders::copy_handler))
        .route("/delete-folder", post(folders::delete_handler))
        .route("/delete", post(objects::delete_handler))
        .route("/rename", post(objects::rename_handler))
        .route("/copy", post(objects::copy_handler))
        .route("/presigned-url/upload", post(presign::upload_handler))
        .route("/presigned-url/download", post(presign::download_handler))
        .route("/view/*key", get(view::handler))
        .route("/bucket-size", get(bucket_size::handler))
        .route("/bucket-size/invalidate", post(bucket_size::invalidate_handler))
        .with_state(state)
}

/// A bucket client for the request's session.
async fn storage(state: &UiState, current: &CurrentSession) -> Result<Storage, DashboardError> {
    Ok(state.storage(&current.session).await?)
}

/// A required, non-empty string field from a JSON body.
fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        assert_eq!(required(Some("a".into())), Some("a".to_string()));
        assert_eq!(required(Some(String::new())), None);
        assert_eq!(required(None), None);
    }
}
