use std::path::{Path, PathBuf};

use clap::Args;
use common::api::user::{CreateUserOutcome, CreateUserRequest};
use common::prelude::{ApiError, NewUserConfig};

use crate::cli::op::ContextError;
use crate::cli::ops::pretty_json;

#[derive(Args, Clone)]
pub struct Create {
    pub username: String,
    pub email: String,
    pub password: String,

    /// Admin project to create the user in (defaults to the active project)
    #[arg(long)]
    pub project: Option<String>,

    /// Where to write `<username>.json` (defaults to the current directory)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

impl std::fmt::Debug for Create {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Create")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("project", &self.project)
            .field("output_dir", &self.output_dir)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UserCreateError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Error: {0}")]
    Invalid(String),
    #[error("Error: username '{0}' cannot be used as a file name.")]
    UnsafeUsername(String),
    #[error("User '{0}' may already exist.")]
    AlreadyExists(String),
    #[error("Error: could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Error: could not encode user config: {0}")]
    Encode(#[from] serde_json::Error),
}

/// The hand-off file is `<username>.json` inside `--output-dir`; the name
/// must not reach outside it.
fn handoff_file_name(username: &str) -> Result<String, UserCreateError> {
    let plain = !username.is_empty()
        && !username.contains(|c: char| c == '/' || c == '\\')
        && !username.starts_with('.')
        && Path::new(username).file_name().and_then(|n| n.to_str()) == Some(username);
    if !plain {
        return Err(UserCreateError::UnsafeUsername(username.to_string()));
    }
    Ok(format!("{}.json", username))
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Create {
    type Error = UserCreateError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let file_name = handoff_file_name(&self.username)?;
        let (project, client) = ctx.connect(self.project.as_deref())?;

        tracing::info!(username = %self.username, project = %project.name, "creating user");
        let request = CreateUserRequest {
            username: self.username.clone(),
            password: self.password.clone(),
            email: self.email.clone(),
        };
        match client.call(&request).await? {
            CreateUserOutcome::Created => {}
            CreateUserOutcome::Invalid(message) => return Err(UserCreateError::Invalid(message)),
            CreateUserOutcome::AlreadyExists => {
                return Err(UserCreateError::AlreadyExists(self.username.clone()))
            }
        }

        let handoff = NewUserConfig::for_new_user(&project, &self.username, &self.password);
        let path = self
            .output_dir
            .clone()
            .unwrap_or_default()
            .join(file_name);
        std::fs::write(&path, pretty_json(&handoff)?).map_err(|source| UserCreateError::Write {
            path: path.clone(),
            source,
        })?;

        Ok(format!(
            "User '{}' created successfully.\n\
             Configuration file '{}' has been generated.\n\
             Use it to configure the EPIC CLI: epic config add {}",
            self.username,
            path.display(),
            path.display()
        ))
    }
}
