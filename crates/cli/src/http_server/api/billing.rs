use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use common::api::billing::GetBillingRequest;
use common::api::project::GetProjectRequest;

use crate::http_server::error::DashboardError;
use crate::http_server::session::CurrentSession;

#[derive(Debug, Serialize)]
pub struct BillingResponse {
    pub spend_limit: Value,
    pub current_spend: Value,
}

fn or_na(value: Option<Value>) -> Value {
    value.unwrap_or_else(|| Value::String("N/A".to_string()))
}

/// Project spend limit alongside the month's spend so far.
pub async fn handler(current: CurrentSession) -> Result<Response, DashboardError> {
    let client = current.session.api_client()?;

    let project_id = client
        .resolve_project_id(current.session.project_name())
        .await?;
    let project = client.call(&GetProjectRequest { project_id }).await?;
    let billing = client.call(&GetBillingRequest).await?;

    let current_spend = billing
        .monthly_spend
        .and_then(|spend| serde_json::to_value(spend).ok());

    Ok(Json(BillingResponse {
        spend_limit: or_na(project.spend_limit),
        current_spend: or_na(current_spend),
    })
    .into_response())
}
