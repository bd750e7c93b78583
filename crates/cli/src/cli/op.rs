use std::error::Error;
use std::path::PathBuf;

use common::prelude::{
    ApiClient, ApiError, ConfigError, ConfigStore, ProjectConfig, SessionEnv, SessionError,
};

/// Failures while turning the command line and environment into a
/// project and an API client. None of these involve the network.
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Clone, Debug)]
pub struct OpContext {
    /// Optional custom config directory (defaults to ~/.epic)
    pub config_path: Option<PathBuf>,
    /// Token and active project, read once at startup
    pub env: SessionEnv,
}

impl OpContext {
    pub fn new(config_path: Option<PathBuf>, env: SessionEnv) -> Self {
        Self { config_path, env }
    }

    pub fn store(&self) -> Result<ConfigStore, ConfigError> {
        ConfigStore::open(self.config_path.clone())
    }

    /// Explicit name, else the active project, then its config entry.
    pub fn project(&self, explicit: Option<&str>) -> Result<ProjectConfig, ContextError> {
        let name = self.env.resolve_project(explicit)?;
        Ok(self.store()?.project(&name)?)
    }

    /// The project plus a client holding the session token.
    pub fn connect(&self, explicit: Option<&str>) -> Result<(ProjectConfig, ApiClient), ContextError> {
        let project = self.project(explicit)?;
        let client = ApiClient::new(&project, self.env.token.as_deref())?;
        Ok((project, client))
    }
}

#[async_trait::async_trait]
pub trait Op: Send + Sync {
    type Error: Error + Send + Sync + 'static;
    type Output;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error>;
}

#[macro_export]
macro_rules! command_enum {
    ($(($variant:ident, $type:ty)),* $(,)?) => {
        #[derive(Subcommand, Debug, Clone)]
        pub enum Command {
            $($variant($type),)*
        }

        #[derive(Debug)]
        pub enum OpOutput {
            $($variant(<$type as $crate::cli::op::Op>::Output),)*
        }

        #[derive(Debug, thiserror::Error)]
        pub enum OpError {
            $(
                #[error(transparent)]
                $variant(<$type as $crate::cli::op::Op>::Error),
            )*
        }

        #[async_trait::async_trait]
        impl $crate::cli::op::Op for Command {
            type Output = OpOutput;
            type Error = OpError;

            async fn execute(&self, ctx: &$crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
                match self {
                    $(
                        Command::$variant(op) => {
                            op.execute(ctx).await
                                .map(OpOutput::$variant)
                                .map_err(OpError::$variant)
                        },
                    )*
                }
            }
        }

        impl std::fmt::Display for OpOutput {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        OpOutput::$variant(output) => write!(f, "{}", output),
                    )*
                }
            }
        }
    };
}
