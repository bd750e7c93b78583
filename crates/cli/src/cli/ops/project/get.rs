use clap::Args;
use common::api::display_value;
use common::api::project::GetProjectRequest;
use common::prelude::ApiError;

use crate::cli::op::ContextError;

#[derive(Args, Debug, Clone)]
pub struct Get {
    /// Project to describe (defaults to the active project)
    pub project_name: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ProjectGetError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Get {
    type Error = ProjectGetError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let (project, client) = ctx.connect(self.project_name.as_deref())?;
        let project_id = client.resolve_project_id(&project.name).await?;
        let details = client.call(&GetProjectRequest { project_id }).await?;

        Ok(format!(
            "Project ID: {}\nDescription: {}\nSpend Limit: {}",
            display_value(&details.project_id),
            display_value(&details.description),
            details.spend_limit_display()
        ))
    }
}
