use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "icd11-gateway")]
#[command(about = "WHO ICD-11 API gateway (token exchange + lookup proxy)", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the HTTP API (requires WHO_CLIENT_ID and WHO_CLIENT_SECRET).
    Serve(ServeArgs),
    /// Load and validate configuration, print a redacted summary, and exit.
    Check,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, default_value_t = 8787)]
    pub port: u16,

    /// Accept-Language sent with ICD-11 lookups.
    #[arg(long, default_value = "en")]
    pub language: String,
}
