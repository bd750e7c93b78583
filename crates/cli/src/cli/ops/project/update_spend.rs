use clap::Args;
use common::api::project::UpdateSpendLimitRequest;
use common::prelude::ApiError;

use crate::cli::op::ContextError;

#[derive(Args, Debug, Clone)]
pub struct UpdateSpend {
    /// New monthly spend limit, in whole currency units
    pub limit: u64,

    /// Project to update (defaults to the active project)
    pub project_name: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateSpendError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for UpdateSpend {
    type Error = UpdateSpendError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let (project, client) = ctx.connect(self.project_name.as_deref())?;
        let project_id = client.resolve_project_id(&project.name).await?;

        tracing::info!(project = %project.name, limit = self.limit, "updating spend limit");
        client
            .call(&UpdateSpendLimitRequest {
                project_id,
                spend_limit: self.limit,
            })
            .await?;

        Ok(format!(
            "Successfully updated spend limit for '{}' to ${}.",
            project.name, self.limit
        ))
    }
}
