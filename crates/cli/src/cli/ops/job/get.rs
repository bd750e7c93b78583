use clap::Args;
use common::api::job::GetJobRequest;
use common::prelude::ApiError;

use crate::cli::op::ContextError;
use crate::cli::ops::pretty_json;

#[derive(Args, Debug, Clone)]
pub struct Get {
    pub job_id: String,

    /// Project the job belongs to (defaults to the active project)
    pub project_name: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum JobGetError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Error: could not render response: {0}")]
    Render(#[from] serde_json::Error),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Get {
    type Error = JobGetError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let (_, client) = ctx.connect(self.project_name.as_deref())?;
        let job = client
            .call(&GetJobRequest {
                id: self.job_id.clone(),
            })
            .await?;
        Ok(format!("Job Details:\n{}", pretty_json(&job)?))
    }
}
