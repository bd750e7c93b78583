use std::time::Duration;

use clap::Args;
use common::prelude::{PresignMethod, Storage};

use super::DataError;
use crate::cli::op::OpContext;

#[derive(Args, Debug, Clone)]
pub struct Presign {
    pub key: String,

    /// Sign an upload (PUT) instead of a download
    #[arg(long)]
    pub upload: bool,

    /// Lifetime of the URL in seconds
    #[arg(long, default_value_t = 3600)]
    pub ttl: u64,

    #[arg(long)]
    pub project: Option<String>,
}

impl Presign {
    fn method(&self) -> PresignMethod {
        if self.upload {
            PresignMethod::Put
        } else {
            PresignMethod::Get
        }
    }

    async fn run(&self, storage: &Storage) -> Result<String, DataError> {
        Ok(storage
            .presign(&self.key, self.method(), Duration::from_secs(self.ttl))
            .await?)
    }
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Presign {
    type Error = DataError;
    type Output = String;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let storage = super::storage(ctx, self.project.as_deref()).await?;
        self.run(&storage).await
    }
}

#[cfg(test)]
mod tests {
    use common::api::data::DataSession;

    use super::*;

    fn session() -> DataSession {
        serde_json::from_value(serde_json::json!({
            "aws_access_key_id": "AKIDEXAMPLE",
            "aws_secret_access_key": "secret",
            "aws_session_token": "session",
            "aws_region": "eu-west-2"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_presign_upload() {
        let storage = Storage::connect(&session(), "eu-west-2", "demo-data").unwrap();
        let op = Presign {
            key: "uploads/input.dat".to_string(),
            upload: true,
            ttl: 600,
            project: None,
        };
        let url = op.run(&storage).await.unwrap();
        assert!(url.contains("uploads/input.dat"));
        assert!(url.contains("X-Amz-Expires=600"));
    }

    #[tokio::test]
    async fn test_presign_needs_signer() {
        let op = Presign {
            key: "a".to_string(),
            upload: false,
            ttl: 60,
            project: None,
        };
        assert!(op.run(&Storage::in_memory()).await.is_err());
    }
}
