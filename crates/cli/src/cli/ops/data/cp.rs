use clap::Args;
use common::prelude::{FolderOutcome, Storage};
use common::storage::folder_move;

use super::{DataError, EMPTY_FOLDER, SAME_FOLDER};
use crate::cli::op::OpContext;

#[derive(Args, Debug, Clone)]
pub struct Cp {
    pub src: String,
    pub dst: String,

    /// Treat both sides as folders and copy everything under `src`
    #[arg(long)]
    pub folder: bool,

    #[arg(long)]
    pub project: Option<String>,
}

impl Cp {
    async fn run(&self, storage: &Storage) -> Result<String, DataError> {
        if !self.folder {
            storage.copy(&self.src, &self.dst).await?;
            return Ok(format!("Copied {} to {}", self.src, self.dst));
        }

        Ok(match storage.copy_folder(&self.src, &self.dst).await? {
            FolderOutcome::Unchanged => SAME_FOLDER.to_string(),
            FolderOutcome::Empty => EMPTY_FOLDER.to_string(),
            FolderOutcome::Completed { objects } => {
                tracing::info!(src = %self.src, dst = %self.dst, objects, "copied folder");
                format!("Successfully copied folder {} to {}", self.src, self.dst)
            }
        })
    }
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Cp {
    type Error = DataError;
    type Output = String;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        if self.folder && folder_move(&self.src, &self.dst)?.is_none() {
            return Ok(SAME_FOLDER.to_string());
        }
        let storage = super::storage(ctx, self.project.as_deref()).await?;
        self.run(&storage).await
    }
}
