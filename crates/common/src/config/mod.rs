mod project;
mod store;

pub use project::{region_from_api_url, NewUserConfig, ProjectConfig, Projects};
pub use store::{ConfigStore, CONFIG_DIR_NAME, CONFIG_FILE_NAME};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("Error: Project '{0}' not found. Please configure it first using 'epic config'.")]
    ProjectNotFound(String),

    #[error("Error: The JSON file must contain a '{0}' field.")]
    MissingField(&'static str),

    #[error("Error: could not derive a region from API URL '{0}'")]
    UnknownRegion(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
