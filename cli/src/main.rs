#![deny(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::args::{CliArgs, Command};

mod api;
mod args;
mod commands;
mod coordinator;
mod formatters;
mod paths;
mod session;
mod settings;
mod snapshot;
#[cfg(test)]
mod test;
mod utils;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();

    let args = CliArgs::parse();

    match args.command {
        Command::Login(login_args) => commands::login::login_cmd(&args.api_url, login_args).await,
        Command::Signup(signup_args) => {
            commands::login::signup_cmd(&args.api_url, signup_args).await
        }
        Command::Logout => commands::login::logout_cmd(),
        Command::Note(subcommand) => commands::note::note_cmd(&args.api_url, subcommand).await,
        Command::Label(subcommand) => commands::label::label_cmd(&args.api_url, subcommand).await,
        Command::Settings(subcommand) => commands::settings::settings_cmd(subcommand),
        Command::Profile(subcommand) => {
            commands::profile::profile_cmd(&args.api_url, subcommand).await
        }
        Command::Admin(subcommand) => commands::admin::admin_cmd(&args.api_url, subcommand).await,
    }
}

fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("slate=warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}
