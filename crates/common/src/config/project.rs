use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

use super::ConfigError;

/// All configured projects, keyed by project name.
pub type Projects = BTreeMap<String, ProjectConfig>;

/// Endpoints and credentials for one EPIC project.
///
/// The on-disk key names predate this client and are kept so existing
/// `~/.epic/config` files keep working. Keys this struct doesn't know about
/// are carried through `extra` so a load/save cycle never drops them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Filled in from the mapping key on load
    #[serde(skip)]
    pub name: String,
    #[serde(rename = "epic_api_url")]
    pub api_base_url: String,
    #[serde(rename = "user_pool_client_id")]
    pub identity_pool_client_id: String,
    #[serde(rename = "user_pool_id", default, skip_serializing_if = "Option::is_none")]
    pub identity_pool_id: Option<String>,
    #[serde(rename = "data_bucket_name", default, skip_serializing_if = "Option::is_none")]
    pub storage_bucket_name: Option<String>,
    #[serde(rename = "batch_job_queue_name", default, skip_serializing_if = "Option::is_none")]
    pub job_queue_name: Option<String>,
    pub region: String,
    pub username: String,
    /// Optional; `epic init` prompts when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Overrides the regional identity provider URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_endpoint: Option<Url>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// The document an admin hands to a newly created user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUserConfig {
    #[serde(default)]
    pub project_name: String,
    pub username: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(rename = "UserPoolClientId")]
    pub user_pool_client_id: String,
    #[serde(rename = "UserPoolId", default)]
    pub user_pool_id: Option<String>,
    #[serde(rename = "DataBucketName", default)]
    pub data_bucket_name: Option<String>,
    #[serde(rename = "BatchJobQueueName", default)]
    pub batch_job_queue_name: Option<String>,
    #[serde(rename = "EpicApiUrl")]
    pub epic_api_url: String,
}

impl NewUserConfig {
    /// Build the hand-off document for a user created under `project`.
    pub fn for_new_user(project: &ProjectConfig, username: &str, password: &str) -> Self {
        Self {
            project_name: project.name.clone(),
            username: username.to_string(),
            password: Some(password.to_string()),
            user_pool_client_id: project.identity_pool_client_id.clone(),
            user_pool_id: project.identity_pool_id.clone(),
            data_bucket_name: project.storage_bucket_name.clone(),
            batch_job_queue_name: project.job_queue_name.clone(),
            epic_api_url: project.api_base_url.clone(),
        }
    }

    pub fn into_project(self) -> Result<ProjectConfig, ConfigError> {
        if self.project_name.is_empty() {
            return Err(ConfigError::MissingField("project_name"));
        }
        let region = region_from_api_url(&self.epic_api_url)
            .ok_or_else(|| ConfigError::UnknownRegion(self.epic_api_url.clone()))?;

        Ok(ProjectConfig {
            name: self.project_name,
            api_base_url: self.epic_api_url,
            identity_pool_client_id: self.user_pool_client_id,
            identity_pool_id: self.user_pool_id,
            storage_bucket_name: self.data_bucket_name,
            job_queue_name: self.batch_job_queue_name,
            region,
            username: self.username,
            password: self.password,
            identity_endpoint: None,
            extra: BTreeMap::new(),
        })
    }
}

/// API gateway hosts look like `<id>.execute-api.<region>.amazonaws.com`.
pub fn region_from_api_url(api_url: &str) -> Option<String> {
    let url = Url::parse(api_url).ok()?;
    url.host_str()?
        .split('.')
        .nth(2)
        .filter(|region| !region.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user() -> NewUserConfig {
        NewUserConfig {
            project_name: "cfd-team".to_string(),
            username: "alice".to_string(),
            password: Some("s3cret".to_string()),
            user_pool_client_id: "client-123".to_string(),
            user_pool_id: Some("eu-west-2_pool".to_string()),
            data_bucket_name: Some("cfd-team-data".to_string()),
            batch_job_queue_name: Some("cfd-queue".to_string()),
            epic_api_url: "https://abc123.execute-api.eu-west-2.amazonaws.com/prod".to_string(),
        }
    }

    #[test]
    fn test_region_from_api_url() {
        assert_eq!(
            region_from_api_url("https://abc123.execute-api.us-east-1.amazonaws.com/prod"),
            Some("us-east-1".to_string())
        );
        assert_eq!(region_from_api_url("http://localhost:8000"), None);
        assert_eq!(region_from_api_url("not a url"), None);
    }

    #[test]
    fn test_new_user_into_project() {
        let project = new_user().into_project().unwrap();
        assert_eq!(project.name, "cfd-team");
        assert_eq!(project.region, "eu-west-2");
        assert_eq!(project.identity_pool_client_id, "client-123");
        assert_eq!(project.storage_bucket_name.as_deref(), Some("cfd-team-data"));
        assert_eq!(project.password.as_deref(), Some("s3cret"));
    }

    #[test]
    fn test_new_user_requires_project_name() {
        let mut user = new_user();
        user.project_name = String::new();
        assert!(matches!(
            user.into_project(),
            Err(ConfigError::MissingField("project_name"))
        ));
    }

    #[test]
    fn test_new_user_round_trips_through_project() {
        let project = new_user().into_project().unwrap();
        let handed_out = NewUserConfig::for_new_user(&project, "bob", "hunter2");
        assert_eq!(handed_out.project_name, "cfd-team");
        assert_eq!(handed_out.username, "bob");
        assert_eq!(handed_out.epic_api_url, project.api_base_url);

        let json = serde_json::to_value(&handed_out).unwrap();
        assert_eq!(json["UserPoolClientId"], "client-123");
        assert_eq!(json["DataBucketName"], "cfd-team-data");
    }
}
