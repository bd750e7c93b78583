use clap::Args;
use common::prelude::ConfigError;

#[derive(Args, Debug, Clone)]
pub struct Remove {
    pub project_name: String,
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Remove {
    type Error = ConfigError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        ctx.store()?.remove(&self.project_name)?;
        Ok(format!("Project '{}' removed.", self.project_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::op::Op;
    use crate::cli::testkit;

    #[tokio::test]
    async fn test_remove() {
        let (ctx, _dir) = testkit::context("https://api.example.com", None);
        let op = Remove {
            project_name: testkit::PROJECT.to_string(),
        };
        assert_eq!(op.execute(&ctx).await.unwrap(), "Project 'demo' removed.");
        assert!(matches!(
            op.execute(&ctx).await,
            Err(ConfigError::ProjectNotFound(_))
        ));
    }
}
