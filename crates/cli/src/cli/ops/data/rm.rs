use clap::Args;
use common::prelude::{FolderOutcome, Storage};

use super::{DataError, EMPTY_FOLDER};
use crate::cli::op::OpContext;

#[derive(Args, Debug, Clone)]
pub struct Rm {
    pub key: String,

    /// Delete every object under the folder `key`
    #[arg(long)]
    pub folder: bool,

    #[arg(long)]
    pub project: Option<String>,
}

impl Rm {
    async fn run(&self, storage: &Storage) -> Result<String, DataError> {
        if !self.folder {
            storage.delete(&self.key).await?;
            return Ok(format!("Deleted {}", self.key));
        }

        Ok(match storage.delete_folder(&self.key).await? {
            FolderOutcome::Completed { objects } => {
                tracing::info!(folder = %self.key, objects, "deleted folder");
                format!("Successfully deleted folder {}", self.key)
            }
            FolderOutcome::Empty | FolderOutcome::Unchanged => EMPTY_FOLDER.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Rm {
    type Error = DataError;
    type Output = String;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let storage = super::storage(ctx, self.project.as_deref()).await?;
        self.run(&storage).await
    }
}
