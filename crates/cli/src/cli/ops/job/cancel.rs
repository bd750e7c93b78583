use clap::Args;
use common::api::job::{CancelJobRequest, CancelOutcome};
use common::prelude::ApiError;

use crate::cli::op::ContextError;

#[derive(Args, Debug, Clone)]
pub struct Cancel {
    pub job_id: String,

    /// Project the job belongs to (defaults to the active project)
    pub project_name: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum JobCancelError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Cancel {
    type Error = JobCancelError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let (_, client) = ctx.connect(self.project_name.as_deref())?;
        let outcome = client
            .call(&CancelJobRequest {
                id: self.job_id.clone(),
            })
            .await?;

        Ok(match outcome {
            CancelOutcome::Cancelled => format!("Job {} cancelled successfully.", self.job_id),
            CancelOutcome::Other { status, body } => format!(
                "Received status code {} when canceling job.\n{}",
                status.as_u16(),
                body
            ),
        })
    }
}
