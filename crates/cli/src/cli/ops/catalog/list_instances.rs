use clap::Args;
use common::api::catalog::ListInstancesRequest;
use common::prelude::ApiError;

use crate::cli::op::ContextError;

#[derive(Args, Debug, Clone)]
pub struct ListInstances {
    /// Project whose instance types to list (defaults to the active project)
    pub project_name: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum InstancesError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error("Error fetching instance types: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for ListInstances {
    type Error = InstancesError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let (_, client) = ctx.connect(self.project_name.as_deref())?;
        let instances = client.call(&ListInstancesRequest).await?;

        if instances.is_empty() {
            return Ok("No instance types found.".to_string());
        }

        let mut lines = vec!["Available Instance Types:".to_string()];
        lines.extend(instances.iter().map(|i| {
            format!(
                "- {}: {} vCPUs, {:.2} GB Memory",
                i.instance_type, i.vcpus, i.memory_gb
            )
        }));
        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    use super::*;
    use crate::cli::op::Op;
    use crate::cli::testkit;

    #[tokio::test]
    async fn test_instances_sorted() {
        let url = testkit::serve(Router::new().route(
            "/catalog/instances",
            get(|| async {
                Json(json!({"instances": [
                    {"instance_type": "m5.xlarge", "vcpus": 4, "memory_gb": 16},
                    {"instance_type": "c5.large", "vcpus": 2, "memory_gb": 3.75}
                ]}))
            }),
        ))
        .await;
        let (ctx, _dir) = testkit::context(&url, Some("token"));

        let output = ListInstances { project_name: None }.execute(&ctx).await.unwrap();
        assert_eq!(
            output,
            "Available Instance Types:\n\
             - c5.large: 2 vCPUs, 3.75 GB Memory\n\
             - m5.xlarge: 4 vCPUs, 16.00 GB Memory"
        );
    }
}
