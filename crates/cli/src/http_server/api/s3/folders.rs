use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use common::prelude::FolderOutcome;
use common::storage::{folder_move, folder_prefix};

use super::required;
use crate::http_server::error::DashboardError;
use crate::http_server::session::CurrentSession;
use crate::UiState;

const SAME_FOLDER: &str = "Source and destination are the same.";
const EMPTY_FOLDER: &str = "Folder is already empty or does not exist.";

fn message(text: impl Into<String>) -> Response {
    Json(json!({ "message": text.into() })).into_response()
}

#[derive(Debug, Deserialize)]
pub struct RenameFolderRequest {
    pub old_prefix: Option<String>,
    pub new_prefix: Option<String>,
}

pub async fn rename_handler(
    State(state): State<UiState>,
    current: CurrentSession,
    Json(req): Json<RenameFolderRequest>,
) -> Result<Response, DashboardError> {
    let (Some(old), Some(new)) = (required(req.old_prefix), required(req.new_prefix)) else {
        return Err(DashboardError::missing("old_prefix or new_prefix"));
    };
    // Same-folder requests never reach the bucket
    let Some((old, new)) = folder_move(&old, &new)? else {
        return Ok(message(SAME_FOLDER));
    };

    let storage = super::storage(&state, &current).await?;
    let outcome = storage.rename_folder(&old, &new).await;
    state.stats().invalidate(current.session.project_name());

    Ok(match outcome? {
        FolderOutcome::Unchanged => message(SAME_FOLDER),
        FolderOutcome::Empty => message(EMPTY_FOLDER),
        FolderOutcome::Completed { .. } => {
            message(format!("Successfully renamed folder {} to {}", old, new))
        }
    })
}

#[derive(Debug, Deserialize)]
pub struct CopyFolderRequest {
    pub source_folder: Option<String>,
    pub destination_folder: Option<String>,
}

pub async fn copy_handler(
    State(state): State<UiState>,
    current: CurrentSession,
    Json(req): Json<CopyFolderRequest>,
) -> Result<Response, DashboardError> {
    let (Some(src), Some(dst)) = (
        required(req.source_folder),
        required(req.destination_folder),
    ) else {
        return Err(DashboardError::missing("source_folder or destination_folder"));
    };
    let Some((src, dst)) = folder_move(&src, &dst)? else {
        return Ok(message(SAME_FOLDER));
    };

    let storage = super::storage(&state, &current).await?;
    let outcome = storage.copy_folder(&src, &dst).await;
    state.stats().invalidate(current.session.project_name());

    Ok(match outcome? {
        FolderOutcome::Unchanged => message(SAME_FOLDER),
        FolderOutcome::Empty => message(EMPTY_FOLDER),
        FolderOutcome::Completed { .. } => {
            message(format!("Successfully copied folder {} to {}", src, dst))
        }
    })
}

#[derive(Debug, Deserialize)]
pub struct DeleteFolderRequest {
    pub prefix: Option<String>,
}

pub async fn delete_handler(
    State(state): State<UiState>,
    current: CurrentSession,
    Json(req): Json<DeleteFolderRequest>,
) -> Result<Response, DashboardError> {
    let Some(prefix) = required(req.prefix) else {
        return Err(DashboardError::missing("folder prefix"));
    };
    let prefix = folder_prefix(&prefix);

    let storage = super::storage(&state, &current).await?;
    let outcome = storage.delete_folder(&prefix).await;
    state.stats().invalidate(current.session.project_name());

    Ok(match outcome? {
        FolderOutcome::Completed { .. } => message(format!("Successfully deleted folder {}", prefix)),
        FolderOutcome::Empty | FolderOutcome::Unchanged => message(EMPTY_FOLDER),
    })
}
