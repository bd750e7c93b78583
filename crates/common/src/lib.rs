/**
 * REST client for the EPIC API.
 *  One `ApiRequest` per endpoint, executed
 *  through a token-scoped `ApiClient`.
 */
pub mod api;
/**
 * Password-grant exchange against the
 *  project's identity provider.
 */
pub mod auth;
/**
 * The on-disk project configuration store
 *  (~/.epic/config).
 */
pub mod config;
/**
 * Session credentials and active-project
 *  resolution. Never persisted.
 */
pub mod session;
/**
 * Object storage for a project's data bucket.
 *  Folder operations are emulated over
 *  list/copy/delete.
 */
pub mod storage;
/**
 * Helper for setting build version information
 *  at compile time.
 */
pub mod version;

pub mod prelude {
    pub use crate::api::{ApiClient, ApiError, ApiRequest};
    pub use crate::auth::{AuthClient, AuthError, AuthToken};
    pub use crate::config::{ConfigError, ConfigStore, NewUserConfig, ProjectConfig, Projects};
    pub use crate::session::{resolve_project, Session, SessionEnv, SessionError, ShellFlavor};
    pub use crate::storage::{
        BucketStats, BucketStatsCache, FolderOutcome, PresignMethod, Storage, StorageError,
    };
    pub use crate::version::BuildInfo;
}
