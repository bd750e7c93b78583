pub mod billing;
pub mod catalog;
pub mod config;
pub mod data;
pub mod init;
pub mod job;
pub mod keys;
pub mod project;
pub mod ui;
pub mod user;
pub mod version;

pub use billing::Billing;
pub use catalog::Catalog;
pub use config::Config;
pub use data::Data;
pub use init::Init;
pub use job::Job;
pub use keys::Keys;
pub use project::Project;
pub use ui::Ui;
pub use user::User;
pub use version::Version;

use clap::ValueEnum;
use common::prelude::ShellFlavor;
use serde::Serialize;

/// `--shell` override for commands that print variable assignments.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Posix,
    Powershell,
}

impl From<Shell> for ShellFlavor {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Posix => ShellFlavor::Posix,
            Shell::Powershell => ShellFlavor::PowerShell,
        }
    }
}

pub(crate) fn shell_flavor(shell: Option<Shell>) -> ShellFlavor {
    shell.map(ShellFlavor::from).unwrap_or_else(ShellFlavor::host)
}

/// JSON with 4-space indentation, matching the config file.
pub(crate) fn pretty_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_json_indent() {
        let rendered = pretty_json(&serde_json::json!({"uuid": "abc"})).unwrap();
        assert_eq!(rendered, "{\n    \"uuid\": \"abc\"\n}");
    }
}
