use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};

use super::{decode_json, endpoint, ApiError, ApiRequest};

/// GET /catalog/applications
#[derive(Debug, Clone, Copy)]
pub struct ListApplicationsRequest;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationVersion {
    #[serde(default)]
    pub app_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    #[serde(default)]
    pub product: Product,
    #[serde(default)]
    pub versions: Vec<ApplicationVersion>,
}

impl Application {
    /// The code of the first listed version, used when submitting jobs.
    pub fn app_code(&self) -> Option<&str> {
        self.versions.first().and_then(|v| v.app_code.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ApplicationList {
    #[serde(default)]
    results: Vec<Application>,
}

impl ApiRequest for ListApplicationsRequest {
    type Response = Vec<Application>;

    fn build_request(&self, base_url: &str, client: &Client) -> Result<RequestBuilder, ApiError> {
        Ok(client.get(endpoint(base_url, &["catalog", "applications"])?))
    }

    fn parse_response(&self, status: StatusCode, body: &str) -> Result<Self::Response, ApiError> {
        let list: ApplicationList = decode_json(status, body)?;
        Ok(list.results)
    }
}

/// GET /catalog/instances
#[derive(Debug, Clone, Copy)]
pub struct ListInstancesRequest;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceType {
    pub instance_type: String,
    pub vcpus: u32,
    pub memory_gb: f64,
}

#[derive(Debug, Deserialize)]
struct InstanceList {
    #[serde(default)]
    instances: Vec<InstanceType>,
}

impl ApiRequest for ListInstancesRequest {
    /// Sorted ascending by instance type.
    type Response = Vec<InstanceType>;

    fn build_request(&self, base_url: &str, client: &Client) -> Result<RequestBuilder, ApiError> {
        Ok(client.get(endpoint(base_url, &["catalog", "instances"])?))
    }

    fn parse_response(&self, status: StatusCode, body: &str) -> Result<Self::Response, ApiError> {
        let mut list: InstanceList = decode_json(status, body)?;
        list.instances
            .sort_by(|a, b| a.instance_type.cmp(&b.instance_type));
        Ok(list.instances)
    }
}
