pub use clap::Parser;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "epic")]
#[command(about = "A CLI for interacting with the EPIC API.")]
pub struct Args {
    /// Path to the epic config directory (defaults to ~/.epic)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: crate::Command,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_config_path() {
        let args = Args::try_parse_from(["epic", "job", "list", "--config-path", "/tmp/epic"]).unwrap();
        assert_eq!(args.config_path, Some(PathBuf::from("/tmp/epic")));
        assert!(matches!(args.command, crate::Command::Job(_)));
    }

    #[test]
    fn test_kebab_case_subcommands() {
        assert!(Args::try_parse_from(["epic", "project", "update-spend", "500", "demo"]).is_ok());
        assert!(Args::try_parse_from(["epic", "catalog", "list-instances"]).is_ok());
        assert!(Args::try_parse_from(["epic", "project", "update-spend", "lots"]).is_err());
    }
}
