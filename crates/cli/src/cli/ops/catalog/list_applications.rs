use clap::Args;
use common::api::catalog::ListApplicationsRequest;
use common::prelude::ApiError;

use crate::cli::op::ContextError;

#[derive(Args, Debug, Clone)]
pub struct ListApplications {
    /// Project whose catalog to list (defaults to the active project)
    pub project_name: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ApplicationsError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error("Error fetching applications: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for ListApplications {
    type Error = ApplicationsError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let (_, client) = ctx.connect(self.project_name.as_deref())?;
        let applications = client.call(&ListApplicationsRequest).await?;

        if applications.is_empty() {
            return Ok("No applications found.".to_string());
        }

        let mut lines = vec!["Available Applications:".to_string()];
        for app in &applications {
            lines.push(format!(
                "- {}:\n  Description: {}\n  App Code: {}",
                app.product.name.as_deref().unwrap_or("N/A"),
                app.product.description.as_deref().unwrap_or("N/A"),
                app.app_code().unwrap_or("N/A")
            ));
        }
        Ok(lines.join("\n"))
    }
}
