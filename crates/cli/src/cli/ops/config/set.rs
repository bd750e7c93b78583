use std::collections::BTreeMap;

use clap::Args;
use common::config::region_from_api_url;
use common::prelude::{ConfigError, ProjectConfig};
use url::Url;

/// Write a project entry, replacing any existing entry of that name
#[derive(Args, Debug, Clone)]
pub struct Set {
    pub project_name: String,

    /// Base URL of the EPIC API
    #[arg(long)]
    pub api_url: Option<String>,

    /// Identity provider app client id
    #[arg(long)]
    pub client_id: Option<String>,

    #[arg(long)]
    pub pool_id: Option<String>,

    #[arg(long)]
    pub bucket: Option<String>,

    #[arg(long)]
    pub queue: Option<String>,

    /// Defaults to the region in the API host name
    #[arg(long)]
    pub region: Option<String>,

    #[arg(long)]
    pub username: Option<String>,

    /// Stored in plain text; omit to be prompted by `epic init`
    #[arg(long)]
    pub password: Option<String>,

    /// Override the identity provider URL
    #[arg(long)]
    pub identity_endpoint: Option<Url>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigSetError {
    #[error("Error: --{0} is required.")]
    Missing(&'static str),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Set {
    /// The full entry; nothing is carried over from a previous one.
    fn project(&self) -> Result<ProjectConfig, ConfigSetError> {
        let api_base_url = self.api_url.clone().ok_or(ConfigSetError::Missing("api-url"))?;
        let region = self
            .region
            .clone()
            .or_else(|| region_from_api_url(&api_base_url))
            .ok_or(ConfigSetError::Missing("region"))?;

        Ok(ProjectConfig {
            name: self.project_name.clone(),
            identity_pool_client_id: self
                .client_id
                .clone()
                .ok_or(ConfigSetError::Missing("client-id"))?,
            username: self.username.clone().ok_or(ConfigSetError::Missing("username"))?,
            api_base_url,
            region,
            identity_pool_id: self.pool_id.clone(),
            storage_bucket_name: self.bucket.clone(),
            job_queue_name: self.queue.clone(),
            password: self.password.clone(),
            identity_endpoint: self.identity_endpoint.clone(),
            extra: BTreeMap::new(),
        })
    }
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Set {
    type Error = ConfigSetError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        ctx.store()?.upsert(self.project()?)?;

        Ok(format!(
            "Project '{}' configured successfully.",
            self.project_name
        ))
    }
}
