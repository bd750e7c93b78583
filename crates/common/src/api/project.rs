use std::collections::BTreeMap;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{decode_json, display_value, endpoint, ApiError, ApiRequest};

/// GET /projects
#[derive(Debug, Clone, Copy)]
pub struct ListProjectsRequest;

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectSummary {
    #[serde(default)]
    pub project_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectList {
    #[serde(default)]
    pub results: Vec<ProjectSummary>,
}

impl ApiRequest for ListProjectsRequest {
    type Response = ProjectList;

    fn build_request(&self, base_url: &str, client: &Client) -> Result<RequestBuilder, ApiError> {
        Ok(client.get(endpoint(base_url, &["projects"])?))
    }

    fn parse_response(&self, status: StatusCode, body: &str) -> Result<Self::Response, ApiError> {
        decode_json(status, body)
    }
}

/// GET /projects/{id}
#[derive(Debug, Clone)]
pub struct GetProjectRequest {
    pub project_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDetails {
    #[serde(default)]
    pub project_id: Value,
    #[serde(default)]
    pub description: Value,
    #[serde(default)]
    pub spend_limit: Option<Value>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ProjectDetails {
    pub fn spend_limit_display(&self) -> String {
        match &self.spend_limit {
            Some(limit) => display_value(limit),
            None => "Not set".to_string(),
        }
    }
}

impl ApiRequest for GetProjectRequest {
    type Response = ProjectDetails;

    fn build_request(&self, base_url: &str, client: &Client) -> Result<RequestBuilder, ApiError> {
        Ok(client.get(endpoint(base_url, &["projects", &self.project_id])?))
    }

    fn parse_response(&self, status: StatusCode, body: &str) -> Result<Self::Response, ApiError> {
        decode_json(status, body)
    }
}

/// PATCH /projects/{id} with a new monthly spend limit (admin only).
#[derive(Debug, Clone)]
pub struct UpdateSpendLimitRequest {
    pub project_id: String,
    pub spend_limit: u64,
}

impl ApiRequest for UpdateSpendLimitRequest {
    type Response = ();

    fn build_request(&self, base_url: &str, client: &Client) -> Result<RequestBuilder, ApiError> {
        Ok(client
            .patch(endpoint(base_url, &["projects", &self.project_id])?)
            .json(&json!({ "spend_limit": self.spend_limit })))
    }

    fn parse_response(&self, status: StatusCode, body: &str) -> Result<Self::Response, ApiError> {
        if status.is_success() {
            Ok(())
        } else {
            Err(ApiError::from_status(status, body))
        }
    }
}
