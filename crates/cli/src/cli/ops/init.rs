use clap::Args;
use common::auth::login;
use common::prelude::{AuthError, ConfigError, ShellFlavor};
use common::session::{ACTIVE_PROJECT_VAR, TOKEN_VAR};

use super::{shell_flavor, Shell};

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// Configured project to authenticate against
    pub project_name: String,

    /// Shell syntax for the printed assignments (defaults to the host's)
    #[arg(long, value_enum)]
    pub shell: Option<Shell>,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("Error: could not read password: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// Everything `epic init` prints on success. Only the two assignment lines
/// are live shell; the rest are comments so `eval` ignores them.
pub fn render_session(flavor: ShellFlavor, project: &str, token: &str) -> String {
    let command = format!("epic init {}", project);
    let how = match flavor {
        ShellFlavor::Posix => "# To configure your current shell session, run the following command:",
        ShellFlavor::PowerShell => {
            "# To configure your current PowerShell session, pipe the output of this command to Invoke-Expression:"
        }
    };

    [
        "# Authentication successful!".to_string(),
        how.to_string(),
        format!("# {}", flavor.apply_hint(&command)),
        flavor.assignment(TOKEN_VAR, token),
        flavor.assignment(ACTIVE_PROJECT_VAR, project),
        String::new(),
        "# Note: These variables are only set for the current shell session.".to_string(),
        "# You will need to run `epic init` again for new sessions.".to_string(),
    ]
    .join("\n")
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Init {
    type Error = InitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let project = ctx.store()?.project(&self.project_name)?;

        let password = match project.password.as_deref().filter(|p| !p.is_empty()) {
            Some(password) => password.to_string(),
            None => dialoguer::Password::new()
                .with_prompt(format!("Password for {}", project.username))
                .interact()?,
        };

        let token = login(&project, &password).await?;
        tracing::info!(project = %project.name, "authenticated");

        Ok(render_session(
            shell_flavor(self.shell),
            &project.name,
            &token.id_token,
        ))
    }
}
