use clap::{Args, Subcommand};

pub mod add;
pub mod list;
pub mod remove;
pub mod set;

use crate::cli::op::Op;

crate::command_enum! {
    (Add, add::Add),
    (Set, set::Set),
    (List, list::List),
    (Remove, remove::Remove),
}

pub type ConfigCommand = Command;

/// Manage project configurations
#[derive(Args, Debug, Clone)]
pub struct Config {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[async_trait::async_trait]
impl Op for Config {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}
