use std::net::SocketAddr;

use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    // Listen address
    pub listen_addr: SocketAddr,
    // Base URL printed for the user to open
    pub hostname: Url,
    // log level for http tracing
    pub log_level: tracing::Level,
}

impl Config {
    pub fn new(listen_addr: SocketAddr, log_level: tracing::Level) -> Result<Self, ConfigError> {
        let hostname = Url::parse(&format!("http://{}/", listen_addr))?;
        tracing::debug!(%listen_addr, "creating HTTP server config");
        Ok(Self {
            listen_addr,
            hostname,
            log_level,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}
