use clap::{Args, Subcommand};

pub mod get;
pub mod update_spend;

use crate::cli::op::Op;

crate::command_enum! {
    (Get, get::Get),
    (UpdateSpend, update_spend::UpdateSpend),
}

pub type ProjectCommand = Command;

/// Inspect and administer projects on the EPIC server
#[derive(Args, Debug, Clone)]
pub struct Project {
    #[command(subcommand)]
    pub command: ProjectCommand,
}

#[async_trait::async_trait]
impl Op for Project {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}
