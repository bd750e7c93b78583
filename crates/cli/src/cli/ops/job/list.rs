use clap::Args;
use common::api::job::{JobEntry, ListJobsRequest};
use common::prelude::ApiError;

use crate::cli::op::ContextError;

#[derive(Args, Debug, Clone)]
pub struct List {
    /// Project to list jobs for (defaults to the active project)
    pub project_name: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum JobListError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for List {
    type Error = JobListError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let (_, client) = ctx.connect(self.project_name.as_deref())?;
        let jobs = client.call(&ListJobsRequest).await?;

        if jobs.is_empty() {
            return Ok("No jobs found.".to_string());
        }

        let mut lines = vec!["Current Jobs:".to_string()];
        for entry in jobs.entries() {
            lines.push(match entry {
                JobEntry::Summary(job) => format!(
                    "  ID: {} | Name: {} | Status: {}",
                    job.uuid, job.name, job.status
                ),
                JobEntry::Malformed(value) => {
                    format!("  Warning: Received malformed job entry: {}", value)
                }
            });
        }
        Ok(lines.join("\n"))
    }
}
