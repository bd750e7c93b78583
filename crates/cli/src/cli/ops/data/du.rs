use clap::Args;
use common::prelude::Storage;

use super::DataError;
use crate::cli::op::OpContext;

#[derive(Args, Debug, Clone)]
pub struct Du {
    #[arg(long)]
    pub project: Option<String>,
}

impl Du {
    async fn run(&self, storage: &Storage) -> Result<String, DataError> {
        let stats = storage.bucket_size().await?;
        Ok(format!(
            "Bucket: {}\nTotal Size: {} bytes\nTotal Objects: {}",
            storage.bucket(),
            stats.total_size,
            stats.total_objects
        ))
    }
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Du {
    type Error = DataError;
    type Output = String;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let storage = super::storage(ctx, self.project.as_deref()).await?;
        self.run(&storage).await
    }
}
