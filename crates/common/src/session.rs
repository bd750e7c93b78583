use std::env;
use std::fmt;

/// Bearer token for the EPIC API
pub const TOKEN_VAR: &str = "EPIC_API_TOKEN";
/// Name of the project `epic init` authenticated against
pub const ACTIVE_PROJECT_VAR: &str = "EPIC_ACTIVE_PROJECT";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Error: No project specified. Please provide a project name or set the EPIC_ACTIVE_PROJECT environment variable via 'epic init'.")]
    MissingProject,
}

/// Session values read from the process environment once, at startup.
///
/// Commands receive this explicitly instead of reading the environment
/// themselves.
#[derive(Clone, Default)]
pub struct SessionEnv {
    pub token: Option<String>,
    pub active_project: Option<String>,
}

impl SessionEnv {
    pub fn from_env() -> Self {
        Self {
            token: non_empty(env::var(TOKEN_VAR).ok()),
            active_project: non_empty(env::var(ACTIVE_PROJECT_VAR).ok()),
        }
    }

    pub fn resolve_project(&self, explicit: Option<&str>) -> Result<String, SessionError> {
        resolve_project(explicit, self.active_project.as_deref())
    }
}

impl fmt::Debug for SessionEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionEnv")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("active_project", &self.active_project)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Explicit name wins, then the active project.
pub fn resolve_project(explicit: Option<&str>, active: Option<&str>) -> Result<String, SessionError> {
    explicit
        .filter(|name| !name.is_empty())
        .or(active.filter(|name| !name.is_empty()))
        .map(str::to_string)
        .ok_or(SessionError::MissingProject)
}

/// An authenticated session against one project.
#[derive(Clone)]
pub struct Session {
    pub project: String,
    pub token: String,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("project", &self.project)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Syntax used when printing variable assignments for the caller's shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellFlavor {
    Posix,
    PowerShell,
}

impl ShellFlavor {
    pub fn host() -> Self {
        if cfg!(windows) {
            Self::PowerShell
        } else {
            Self::Posix
        }
    }

    pub fn assignment(&self, name: &str, value: &str) -> String {
        match self {
            Self::Posix => format!("export {}='{}'", name, value.replace('\'', r"'\''")),
            Self::PowerShell => format!(
                "$env:{}=\"{}\"",
                name,
                value.replace('`', "``").replace('"', "`\"").replace('$', "`$")
            ),
        }
    }

    /// How to apply the printed assignments to the current shell.
    pub fn apply_hint(&self, command: &str) -> String {
        match self {
            Self::Posix => format!("eval \"$({})\"", command),
            Self::PowerShell => format!("{} | Invoke-Expression", command),
        }
    }
}
