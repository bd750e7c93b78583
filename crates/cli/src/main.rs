// CLI modules
mod cli;

use clap::{Parser, Subcommand};
use cli::{
    args::Args, op::Op, Billing, Catalog, Config, Data, Init, Job, Keys, Project, Ui, User,
    Version,
};
use common::prelude::SessionEnv;

command_enum! {
    (Config, Config),
    (Init, Init),
    (User, User),
    (Project, Project),
    (Billing, Billing),
    (Keys, Keys),
    (Job, Job),
    (Catalog, Catalog),
    (Data, Data),
    (Ui, Ui),
    (Version, Version),
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // `ui` installs its own subscriber
    let guard = match args.command {
        Command::Ui(_) => None,
        _ => Some(epic_cli::process::init_cli_logging()),
    };

    let ctx = cli::op::OpContext::new(args.config_path, SessionEnv::from_env());

    match args.command.execute(&ctx).await {
        Ok(output) => {
            let output = output.to_string();
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("{}", e);
            drop(guard);
            std::process::exit(1);
        }
    }
}
