mod client;
mod error;

pub mod billing;
pub mod catalog;
pub mod data;
pub mod job;
pub mod project;
pub mod user;

pub use client::ApiClient;
pub use error::ApiError;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

/// One EPIC API operation: how to build the request and how to read the
/// response.
pub trait ApiRequest {
    type Response;

    fn build_request(&self, base_url: &str, client: &Client) -> Result<RequestBuilder, ApiError>;

    fn parse_response(&self, status: StatusCode, body: &str) -> Result<Self::Response, ApiError>;
}

/// Join path segments onto the base URL, keeping any base path (e.g. a
/// `/prod` stage). An empty trailing segment yields a trailing slash.
pub(crate) fn endpoint(base_url: &str, segments: &[&str]) -> Result<Url, ApiError> {
    let mut url = Url::parse(base_url)?;
    url.path_segments_mut()
        .map_err(|_| ApiError::InvalidBaseUrl(base_url.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Decode a JSON body on success, otherwise surface the API's error payload.
pub(crate) fn decode_json<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, ApiError> {
    if !status.is_success() {
        return Err(ApiError::from_status(status, body));
    }
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Render a JSON scalar the way a user would type it.
pub fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => "N/A".to_string(),
        other => other.to_string(),
    }
}
