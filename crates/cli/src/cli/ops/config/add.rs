use std::path::PathBuf;

use clap::Args;
use common::prelude::{ConfigError, NewUserConfig};

#[derive(Args, Debug, Clone)]
pub struct Add {
    /// JSON file issued by an admin via `epic user create`
    pub user_json_file: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigAddError {
    #[error("Error: could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Error: Invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Add {
    type Error = ConfigAddError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let path = &self.user_json_file;
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigAddError::Read {
            path: path.clone(),
            source,
        })?;
        let user: NewUserConfig =
            serde_json::from_str(&raw).map_err(|source| ConfigAddError::Parse {
                path: path.clone(),
                source,
            })?;

        let project = user.into_project()?;
        let name = project.name.clone();
        ctx.store()?.upsert(project)?;

        Ok(format!("Project '{}' configured successfully.", name))
    }
}
