use clap::Args;
use common::api::data::GetDataSessionRequest;
use common::prelude::ApiError;

use super::{shell_flavor, Shell};
use crate::cli::op::ContextError;

#[derive(Args, Debug, Clone)]
pub struct Keys {
    /// Project whose bucket to access (defaults to the active project)
    pub project_name: Option<String>,

    /// Shell syntax for the printed assignments (defaults to the host's)
    #[arg(long, value_enum)]
    pub shell: Option<Shell>,
}

#[derive(Debug, thiserror::Error)]
pub enum KeysError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error("Error fetching data session keys: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Keys {
    type Error = KeysError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let (project, client) = ctx.connect(self.project_name.as_deref())?;
        let session = client.call(&GetDataSessionRequest).await?;

        let bucket = project
            .storage_bucket_name
            .as_deref()
            .or_else(|| session.bucket())
            .unwrap_or_default();
        let region = session.region.as_deref().unwrap_or(&project.region);

        let flavor = shell_flavor(self.shell);
        let mut lines =
            vec!["# Run the following commands in your shell to configure your data session:".to_string()];
        for (name, value) in [
            ("AWS_ACCESS_KEY_ID", session.access_key_id.as_str()),
            ("AWS_SECRET_ACCESS_KEY", session.secret_access_key.as_str()),
            ("AWS_SESSION_TOKEN", session.session_token.as_str()),
            ("EPIC_S3_BUCKET", bucket),
            ("AWS_REGION", region),
        ] {
            lines.push(flavor.assignment(name, value));
        }

        Ok(lines.join("\n"))
    }
}
