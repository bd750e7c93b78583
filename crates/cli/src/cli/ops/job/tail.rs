use clap::Args;
use common::api::job::TailJobRequest;
use common::prelude::ApiError;

use crate::cli::op::ContextError;

#[derive(Args, Debug, Clone)]
pub struct Tail {
    pub job_id: String,

    /// Project the job belongs to (defaults to the active project)
    pub project_name: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum JobTailError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Tail {
    type Error = JobTailError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let (_, client) = ctx.connect(self.project_name.as_deref())?;
        let logs = client
            .call(&TailJobRequest {
                id: self.job_id.clone(),
            })
            .await?;

        if logs.logs.is_empty() {
            return Ok(format!("No logs found for job {}.", self.job_id));
        }

        let mut lines = vec![format!("Logs for job {}:", self.job_id)];
        lines.extend(logs.logs.iter().map(|event| event.line()));
        Ok(lines.join("\n"))
    }
}
