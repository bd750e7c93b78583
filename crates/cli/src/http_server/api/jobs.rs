use axum::extract::Path;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use common::api::job::{CancelJobRequest, ListJobsRequest, TailJobRequest};

use crate::http_server::error::DashboardError;
use crate::http_server::session::CurrentSession;

/// The raw `results` array; the page renders missing fields itself.
pub async fn list_handler(current: CurrentSession) -> Result<Response, DashboardError> {
    let client = current.session.api_client()?;
    let jobs = client.call(&ListJobsRequest).await?;
    Ok(Json(jobs.results).into_response())
}

pub async fn cancel_handler(
    current: CurrentSession,
    Path(job_uuid): Path<String>,
) -> Result<Response, DashboardError> {
    let client = current.session.api_client()?;
    client.call(&CancelJobRequest { id: job_uuid.clone() }).await?;
    tracing::info!(job = %job_uuid, "job cancellation requested");
    Ok(Json(json!({"message": "Job cancellation requested"})).into_response())
}

pub async fn tail_handler(
    current: CurrentSession,
    Path(job_uuid): Path<String>,
) -> Result<Response, DashboardError> {
    let client = current.session.api_client()?;
    let logs = client.call(&TailJobRequest { id: job_uuid }).await?;
    Ok(Json(logs).into_response())
}
