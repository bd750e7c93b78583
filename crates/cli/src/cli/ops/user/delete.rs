use clap::Args;
use common::api::user::DeleteUserRequest;
use common::prelude::ApiError;
use dialoguer::Confirm;

use crate::cli::op::ContextError;

#[derive(Args, Debug, Clone)]
pub struct Delete {
    pub username: String,

    /// Admin project to delete the user from (defaults to the active project)
    #[arg(long)]
    pub project: Option<String>,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum UserDeleteError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Error: could not read confirmation: {0}")]
    Prompt(#[from] dialoguer::Error),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Delete {
    type Error = UserDeleteError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let (project, client) = ctx.connect(self.project.as_deref())?;

        if !self.yes {
            let confirmed = Confirm::new()
                .with_prompt(format!(
                    "Are you sure you want to delete user '{}'?",
                    self.username
                ))
                .default(false)
                .interact()?;
            if !confirmed {
                return Ok("Aborted.".to_string());
            }
        }

        tracing::info!(username = %self.username, project = %project.name, "deleting user");
        client
            .call(&DeleteUserRequest {
                username: self.username.clone(),
            })
            .await?;

        Ok(format!("User '{}' deleted successfully.", self.username))
    }
}
