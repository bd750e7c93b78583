use std::path::PathBuf;

use clap::Args;
use common::api::job::CreateJobRequest;
use common::prelude::ApiError;

use crate::cli::op::ContextError;
use crate::cli::ops::pretty_json;

#[derive(Args, Debug, Clone)]
pub struct Create {
    /// JSON job definition
    pub file: PathBuf,

    /// Project to submit to (defaults to the active project)
    pub project_name: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum JobCreateError {
    #[error("Error: File not found at {0}")]
    FileNotFound(PathBuf),
    #[error("Error: could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Error: Invalid JSON in {0}")]
    InvalidJson(PathBuf),
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Error: could not render response: {0}")]
    Render(#[from] serde_json::Error),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Create {
    type Error = JobCreateError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let (_, client) = ctx.connect(self.project_name.as_deref())?;

        let contents = std::fs::read_to_string(&self.file).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                JobCreateError::FileNotFound(self.file.clone())
            } else {
                JobCreateError::Read {
                    path: self.file.clone(),
                    source,
                }
            }
        })?;
        let definition = serde_json::from_str(&contents)
            .map_err(|_| JobCreateError::InvalidJson(self.file.clone()))?;

        let job = client.call(&CreateJobRequest { definition }).await?;
        Ok(format!("Job created successfully:\n{}", pretty_json(&job)?))
    }
}
