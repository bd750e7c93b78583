use clap::Args;
use common::prelude::Storage;

use super::DataError;
use crate::cli::op::OpContext;

#[derive(Args, Debug, Clone)]
pub struct Ls {
    /// Folder to list (defaults to the bucket root)
    #[arg(default_value = "")]
    pub prefix: String,

    #[arg(long)]
    pub project: Option<String>,
}

impl Ls {
    async fn run(&self, storage: &Storage) -> Result<String, DataError> {
        let listing = storage.list(&self.prefix).await?;
        if listing.files.is_empty() && listing.folders.is_empty() {
            return Ok(format!("No objects found under '{}'.", self.prefix));
        }

        let mut lines: Vec<String> = listing
            .folders
            .iter()
            .map(|folder| format!("{:>30} {}", "PRE", folder))
            .collect();
        lines.extend(listing.files.iter().map(|file| {
            format!(
                "{} {:>10} {}",
                file.last_modified.format("%Y-%m-%d %H:%M:%S"),
                file.size,
                file.key
            )
        }));
        Ok(lines.join("\n"))
    }
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Ls {
    type Error = DataError;
    type Output = String;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let storage = super::storage(ctx, self.project.as_deref()).await?;
        self.run(&storage).await
    }
}
