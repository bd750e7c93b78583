use clap::{Args, Subcommand};
use common::prelude::{Storage, StorageError};

pub mod cp;
pub mod du;
pub mod ls;
pub mod mv;
pub mod presign;
pub mod rm;

use crate::cli::op::{ContextError, Op, OpContext};

crate::command_enum! {
    (Ls, ls::Ls),
    (Cp, cp::Cp),
    (Mv, mv::Mv),
    (Rm, rm::Rm),
    (Presign, presign::Presign),
    (Du, du::Du),
}

pub type DataCommand = Command;

/// Work with the project's data bucket
#[derive(Args, Debug, Clone)]
pub struct Data {
    #[command(subcommand)]
    pub command: DataCommand,
}

#[async_trait::async_trait]
impl Op for Data {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Fresh temporary credentials for the project's bucket.
pub(crate) async fn storage(ctx: &OpContext, project: Option<&str>) -> Result<Storage, DataError> {
    let (project, client) = ctx.connect(project)?;
    Ok(Storage::for_session(&client, &project).await?)
}

pub(crate) const SAME_FOLDER: &str = "Source and destination are the same.";
pub(crate) const EMPTY_FOLDER: &str = "Folder is already empty or does not exist.";
