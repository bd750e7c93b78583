use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;

use super::error::ApiError;
use super::project::{ListProjectsRequest, ProjectList};
use super::ApiRequest;
use crate::config::ProjectConfig;

/// HTTP client bound to one project's API and one bearer token.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    /// Fails with [`ApiError::NotAuthenticated`] before any I/O when there
    /// is no token.
    pub fn new(project: &ProjectConfig, token: Option<&str>) -> Result<Self, ApiError> {
        let token = token
            .filter(|t| !t.trim().is_empty())
            .ok_or(ApiError::NotAuthenticated)?;

        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ApiError::InvalidToken)?;
        authorization.set_sensitive(true);

        let mut default_headers = HeaderMap::new();
        default_headers.insert(AUTHORIZATION, authorization);
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = Client::builder().default_headers(default_headers).build()?;

        Ok(Self {
            base_url: project.api_base_url.clone(),
            client,
        })
    }

    pub async fn call<T: ApiRequest>(&self, request: &T) -> Result<T::Response, ApiError> {
        let request_builder = request.build_request(&self.base_url, &self.client)?;
        let response = request_builder.send().await?;

        let status = response.status();
        let url = response.url().clone();
        let body = response.text().await?;
        tracing::debug!(%url, %status, "api response");

        request.parse_response(status, &body)
    }

    /// Find the server-side id for a project name.
    ///
    /// The API has no lookup by name, so this lists every project and
    /// matches on `project_id`. Nothing is cached; every call re-lists.
    pub async fn resolve_project_id(&self, name: &str) -> Result<String, ApiError> {
        let response: ProjectList = self.call(&ListProjectsRequest).await?;

        response
            .results
            .into_iter()
            .filter_map(|p| p.project_id)
            .find(|id| id == name)
            .ok_or_else(|| ApiError::NotFound(format!("Project '{}' not found on the server.", name)))
    }

    /// Get the base URL for API requests
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
