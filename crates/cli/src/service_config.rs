use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use common::storage::DEFAULT_STATS_TTL;

/// Default listen address for `epic ui`.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:2395";

#[derive(Debug, Clone)]
pub struct Config {
    // http server configuration
    pub listen_addr: SocketAddr,

    // project configuration
    /// Custom config directory (defaults to ~/.epic)
    pub config_path: Option<PathBuf>,

    // bucket stats cache
    pub stats_ttl: Duration,

    // logging
    pub log_level: tracing::Level,
    /// Directory for log files (logs to stdout only if not set)
    pub log_dir: Option<PathBuf>,
}

impl Config {
    pub fn new(listen_addr: SocketAddr) -> Self {
        Self {
            listen_addr,
            config_path: None,
            stats_ttl: DEFAULT_STATS_TTL,
            log_level: tracing::Level::INFO,
            log_dir: None,
        }
    }
}
