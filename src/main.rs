use anyhow::Context;
use clap::Parser;

use icd11_gateway::{cli, config, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Matches the frontend workflow: credentials live in .env, never in code.
    dotenv::dotenv().ok();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = cli::Args::parse();

    match args.cmd {
        cli::Command::Serve(cmd) => server::run(cmd).await.context("serve failed"),
        cli::Command::Check => {
            let config =
                config::WhoApiConfig::from_env().context("load WHO API configuration")?;
            config.log_summary();
            tracing::info!("Configuration OK");
            Ok(())
        }
    }
}
