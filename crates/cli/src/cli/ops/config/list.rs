use clap::Args;
use common::prelude::ConfigError;

#[derive(Args, Debug, Clone)]
pub struct List;

#[async_trait::async_trait]
impl crate::cli::op::Op for List {
    type Error = ConfigError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let projects = ctx.store()?.load()?;
        if projects.is_empty() {
            return Ok("No projects configured. Use 'epic config set' to add one.".to_string());
        }

        let active = ctx.env.active_project.as_deref();
        let mut lines = vec!["Configured projects:".to_string()];
        for name in projects.keys() {
            if Some(name.as_str()) == active {
                lines.push(format!("- {} (active)", name));
            } else {
                lines.push(format!("- {}", name));
            }
        }
        Ok(lines.join("\n"))
    }
}
