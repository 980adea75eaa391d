//! # kc-data-setup
//!
//! Provisions the example realm, client, mappers and users.

#![forbid(unsafe_code)]

use clap::Parser;
use kc_data_setup::{
    AdminClient, Cli, Command, SetupConfig, SetupResult, bootstrap, output::error,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli).await {
        error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> SetupResult<()> {
    let config = SetupConfig::load(cli.config.as_deref())?.with_overrides(cli);
    config.validate()?;

    let client = AdminClient::connect(&config).await?;
    bootstrap::run(&client, cli.command.unwrap_or(Command::All)).await
}
