use clap::{Args, Subcommand};

pub mod cancel;
pub mod create;
pub mod get;
pub mod list;
pub mod tail;

use crate::cli::op::Op;

crate::command_enum! {
    (Create, create::Create),
    (List, list::List),
    (Get, get::Get),
    (Cancel, cancel::Cancel),
    (Tail, tail::Tail),
}

pub type JobCommand = Command;

/// Submit and monitor batch jobs
#[derive(Args, Debug, Clone)]
pub struct Job {
    #[command(subcommand)]
    pub command: JobCommand,
}

#[async_trait::async_trait]
impl Op for Job {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}
