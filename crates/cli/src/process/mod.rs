pub mod utils;

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::time::timeout;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::http_server;
use crate::state::StateError;
use crate::{DashboardConfig, UiState};

const FINAL_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error(transparent)]
    State(#[from] StateError),
    #[error("Error: could not listen on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] http_server::ConfigError),
}

/// Handle for a running dashboard.
pub struct ShutdownHandle {
    graceful_waiter: tokio::task::JoinHandle<()>,
    server: tokio::task::JoinHandle<()>,
    shutdown_tx: watch::Sender<()>,
    local_addr: SocketAddr,
    url: url::Url,
}

impl ShutdownHandle {
    /// Address actually bound (differs from the config when it used port 0).
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// URL to open in a browser.
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// Block until the dashboard shuts down (via signal or explicit shutdown).
    pub async fn wait(self) {
        let _ = self.graceful_waiter.await;
        if timeout(FINAL_SHUTDOWN_TIMEOUT, self.server).await.is_err() {
            tracing::error!(
                "Failed to shut down within {} seconds",
                FINAL_SHUTDOWN_TIMEOUT.as_secs()
            );
        }
    }

    /// Trigger shutdown programmatically.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }
}

/// Subscriber for one-shot CLI commands: warnings and above to stderr
/// unless `RUST_LOG` says otherwise.
pub fn init_cli_logging() -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::WARN.into())
        .from_env_lossy();

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(writer)
                .with_filter(filter),
        )
        .try_init();

    guard
}

/// Initialize logging, panic handler, and build info reporting.
/// Returns guards that must be kept alive for the duration of the program.
pub fn init_logging(config: &DashboardConfig) -> Vec<WorkerGuard> {
    use tracing_subscriber::fmt::format::FmtSpan;

    let mut guards = Vec::new();

    // Stdout layer
    let (stdout_writer, stdout_guard) = tracing_appender::non_blocking(std::io::stdout());
    guards.push(stdout_guard);

    let stdout_env_filter = EnvFilter::builder()
        .with_default_directive(config.log_level.into())
        .from_env_lossy();

    let stdout_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(stdout_writer)
        .with_filter(stdout_env_filter);

    // File layer (if log_dir is set)
    if let Some(log_dir) = &config.log_dir {
        if let Err(e) = std::fs::create_dir_all(log_dir) {
            eprintln!(
                "Warning: Failed to create log directory {:?}: {}",
                log_dir, e
            );
        }

        let file_appender = tracing_appender::rolling::daily(log_dir, "epic-ui.log");
        let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);
        guards.push(file_guard);

        let file_env_filter = EnvFilter::builder()
            .with_default_directive(config.log_level.into())
            .from_env_lossy();

        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(file_writer)
            .with_ansi(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(file_env_filter);

        let _ = tracing_subscriber::registry()
            .with(stdout_layer)
            .with(file_layer)
            .try_init();
    } else {
        let _ = tracing_subscriber::registry().with(stdout_layer).try_init();
    }

    utils::register_panic_logger();
    utils::report_build_info();

    guards
}

/// Bind the listener and spawn the server, returning once it accepts
/// connections.
pub async fn start_dashboard(config: &DashboardConfig) -> Result<ShutdownHandle, LaunchError> {
    let state = UiState::from_config(config)?;
    start_with_state(config, state).await
}

pub async fn start_with_state(
    config: &DashboardConfig,
    state: UiState,
) -> Result<ShutdownHandle, LaunchError> {
    let listener = TcpListener::bind(config.listen_addr)
        .await
        .map_err(|source| LaunchError::Bind {
            addr: config.listen_addr,
            source,
        })?;
    let local_addr = listener.local_addr().map_err(|source| LaunchError::Bind {
        addr: config.listen_addr,
        source,
    })?;

    let http_config = http_server::Config::new(local_addr, config.log_level)?;
    let url = http_config.hostname.clone();
    let (graceful_waiter, shutdown_tx, shutdown_rx) = utils::graceful_shutdown_blocker();

    let server = tokio::spawn(async move {
        if let Err(e) = http_server::run(http_config, state, listener, shutdown_rx).await {
            tracing::error!("Dashboard server error: {}", e);
        }
    });

    Ok(ShutdownHandle {
        graceful_waiter,
        server,
        shutdown_tx,
        local_addr,
        url,
    })
}

/// Runs the dashboard until a shutdown signal is received. Use for CLI
/// binary usage.
pub async fn spawn_dashboard(config: &DashboardConfig) -> Result<(), LaunchError> {
    let _guards = init_logging(config);
    let handle = start_dashboard(config).await?;

    println!("EPIC dashboard running at {}", handle.url());
    println!("Press Ctrl-C to stop.");

    handle.wait().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration as StdDuration;

    use common::prelude::ConfigStore;
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn test_start_and_shutdown() {
        let dir = TempDir::new().unwrap();
        let mut config = DashboardConfig::new("127.0.0.1:0".parse().unwrap());
        config.config_path = Some(dir.path().to_path_buf());
        let state = UiState::new(
            ConfigStore::open(config.config_path.clone()).unwrap(),
            StdDuration::from_secs(60),
        );

        let handle = start_with_state(&config, state).await.unwrap();
        assert_ne!(handle.local_addr().port(), 0);
        assert_eq!(
            handle.url().as_str(),
            format!("http://{}/", handle.local_addr())
        );

        let stream = tokio::net::TcpStream::connect(handle.local_addr()).await;
        assert!(stream.is_ok());
        drop(stream);

        handle.shutdown();
        timeout(StdDuration::from_secs(5), handle.wait()).await.unwrap();
    }
}
