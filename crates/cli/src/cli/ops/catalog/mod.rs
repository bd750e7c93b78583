use clap::{Args, Subcommand};

pub mod list_applications;
pub mod list_instances;

use crate::cli::op::Op;

crate::command_enum! {
    (ListApplications, list_applications::ListApplications),
    (ListInstances, list_instances::ListInstances),
}

pub type CatalogCommand = Command;

/// Browse the applications and instance types available for jobs
#[derive(Args, Debug, Clone)]
pub struct Catalog {
    #[command(subcommand)]
    pub command: CatalogCommand,
}

#[async_trait::async_trait]
impl Op for Catalog {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}
