use std::collections::BTreeMap;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{decode_json, display_value, endpoint, ApiError, ApiRequest};

/// POST /job/ with a job definition.
#[derive(Debug, Clone)]
pub struct CreateJobRequest {
    pub definition: Value,
}

impl ApiRequest for CreateJobRequest {
    type Response = Value;

    fn build_request(&self, base_url: &str, client: &Client) -> Result<RequestBuilder, ApiError> {
        Ok(client
            .post(endpoint(base_url, &["job", ""])?)
            .json(&self.definition))
    }

    fn parse_response(&self, status: StatusCode, body: &str) -> Result<Self::Response, ApiError> {
        decode_json(status, body)
    }
}

/// GET /job/
#[derive(Debug, Clone, Copy)]
pub struct ListJobsRequest;

/// Raw job list. Entries are opaque JSON; see [`JobList::entries`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobList {
    #[serde(default)]
    pub results: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSummary {
    pub uuid: String,
    pub name: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum JobEntry {
    Summary(JobSummary),
    /// Anything that is not a JSON object
    Malformed(Value),
}

impl JobEntry {
    pub fn from_value(value: &Value) -> Self {
        match value.as_object() {
            Some(job) => {
                let field = |name: &str| job.get(name).map(display_value).unwrap_or_else(|| "N/A".to_string());
                JobEntry::Summary(JobSummary {
                    uuid: field("uuid"),
                    name: field("name"),
                    status: field("status"),
                })
            }
            None => JobEntry::Malformed(value.clone()),
        }
    }
}

impl JobList {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = JobEntry> + '_ {
        self.results.iter().map(JobEntry::from_value)
    }
}

impl ApiRequest for ListJobsRequest {
    type Response = JobList;

    fn build_request(&self, base_url: &str, client: &Client) -> Result<RequestBuilder, ApiError> {
        Ok(client.get(endpoint(base_url, &["job", ""])?))
    }

    fn parse_response(&self, status: StatusCode, body: &str) -> Result<Self::Response, ApiError> {
        decode_json(status, body)
    }
}

/// GET /job/{id}/
#[derive(Debug, Clone)]
pub struct GetJobRequest {
    pub id: String,
}

impl ApiRequest for GetJobRequest {
    type Response = Value;

    fn build_request(&self, base_url: &str, client: &Client) -> Result<RequestBuilder, ApiError> {
        Ok(client.get(endpoint(base_url, &["job", &self.id, ""])?))
    }

    fn parse_response(&self, status: StatusCode, body: &str) -> Result<Self::Response, ApiError> {
        decode_json(status, body)
    }
}

/// POST /job/{id}/cancel/
#[derive(Debug, Clone)]
pub struct CancelJobRequest {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelOutcome {
    /// 204 No Content
    Cancelled,
    /// Some other success status; the body is passed through for the user
    Other { status: StatusCode, body: String },
}

impl ApiRequest for CancelJobRequest {
    type Response = CancelOutcome;

    fn build_request(&self, base_url: &str, client: &Client) -> Result<RequestBuilder, ApiError> {
        Ok(client.post(endpoint(base_url, &["job", &self.id, "cancel", ""])?))
    }

    fn parse_response(&self, status: StatusCode, body: &str) -> Result<Self::Response, ApiError> {
        match status {
            StatusCode::NO_CONTENT => Ok(CancelOutcome::Cancelled),
            s if s.is_success() => Ok(CancelOutcome::Other {
                status: s,
                body: body.to_string(),
            }),
            s => Err(ApiError::from_status(s, body)),
        }
    }
}

/// GET /job/{id}/tail/
#[derive(Debug, Clone)]
pub struct TailJobRequest {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    #[serde(default)]
    pub timestamp: Value,
    #[serde(default)]
    pub message: Value,
}

impl LogEvent {
    /// `[<timestamp>] <message>`
    pub fn line(&self) -> String {
        format!("[{}] {}", display_value(&self.timestamp), display_value(&self.message))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobLogs {
    #[serde(default)]
    pub logs: Vec<LogEvent>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ApiRequest for TailJobRequest {
    type Response = JobLogs;

    fn build_request(&self, base_url: &str, client: &Client) -> Result<RequestBuilder, ApiError> {
        Ok(client.get(endpoint(base_url, &["job", &self.id, "tail", ""])?))
    }

    fn parse_response(&self, status: StatusCode, body: &str) -> Result<Self::Response, ApiError> {
        decode_json(status, body)
    }
}
