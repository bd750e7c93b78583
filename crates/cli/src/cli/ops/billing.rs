use clap::Args;
use common::api::billing::GetBillingRequest;
use common::prelude::ApiError;

use crate::cli::op::ContextError;

#[derive(Args, Debug, Clone)]
pub struct Billing {
    /// Project to report on (defaults to the active project)
    pub project_name: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum BillingError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error("Error fetching billing information: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Billing {
    type Error = BillingError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let (_, client) = ctx.connect(self.project_name.as_deref())?;
        let limits = client.call(&GetBillingRequest).await?;

        Ok(format!(
            "Billing Information:\n  Monthly Spend to Date: {}",
            limits.spend_to_date()
        ))
    }
}
