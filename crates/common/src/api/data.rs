use std::fmt;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;

use super::{decode_json, endpoint, ApiError, ApiRequest};

/// GET /data/session
#[derive(Debug, Clone, Copy)]
pub struct GetDataSessionRequest;

/// Temporary storage credentials scoped to the project's bucket.
#[derive(Clone, Deserialize)]
pub struct DataSession {
    #[serde(rename = "aws_access_key_id")]
    pub access_key_id: String,
    #[serde(rename = "aws_secret_access_key")]
    pub secret_access_key: String,
    #[serde(rename = "aws_session_token")]
    pub session_token: String,
    #[serde(rename = "aws_region", default)]
    pub region: Option<String>,
    /// Bucket name, possibly as an `s3://` URI
    #[serde(rename = "s3_location", default)]
    pub location: Option<String>,
}

impl DataSession {
    pub fn bucket(&self) -> Option<&str> {
        self.location
            .as_deref()
            .map(|l| l.trim_start_matches("s3://").trim_end_matches('/'))
            .filter(|b| !b.is_empty())
    }
}

impl fmt::Debug for DataSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataSession")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &"<redacted>")
            .field("region", &self.region)
            .field("location", &self.location)
            .finish()
    }
}

impl ApiRequest for GetDataSessionRequest {
    type Response = DataSession;

    fn build_request(&self, base_url: &str, client: &Client) -> Result<RequestBuilder, ApiError> {
        Ok(client.get(endpoint(base_url, &["data", "session"])?))
    }

    fn parse_response(&self, status: StatusCode, body: &str) -> Result<Self::Response, ApiError> {
        decode_json(status, body)
    }
}
