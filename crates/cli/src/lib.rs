// Dashboard modules (`epic ui`)
pub mod http_server;
pub mod process;
pub mod service_config;

// Shared state: config store, login sessions, bucket stats
pub mod state;

pub use process::{spawn_dashboard, start_dashboard, LaunchError, ShutdownHandle};
pub use service_config::Config as DashboardConfig;
pub use state::{DashboardSession, SessionStorage, StateError, StorageProvider, UiState};
