use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use epic_cli::service_config::DEFAULT_LISTEN_ADDR;
use epic_cli::{spawn_dashboard, DashboardConfig, LaunchError};

#[derive(Args, Debug, Clone)]
pub struct Ui {
    /// Address for the dashboard to listen on
    #[arg(long, default_value = DEFAULT_LISTEN_ADDR)]
    pub addr: SocketAddr,

    /// Directory for log files (logs to stdout only if not set)
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// How long bucket size totals are cached, in seconds
    #[arg(long, default_value_t = 300)]
    pub stats_ttl_secs: u64,
}

impl Ui {
    fn config(&self, config_path: Option<PathBuf>) -> DashboardConfig {
        DashboardConfig {
            config_path,
            stats_ttl: Duration::from_secs(self.stats_ttl_secs),
            log_dir: self.log_dir.clone(),
            ..DashboardConfig::new(self.addr)
        }
    }
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Ui {
    type Error = LaunchError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        spawn_dashboard(&self.config(ctx.config_path.clone())).await?;
        Ok("Dashboard stopped.".to_string())
    }
}
