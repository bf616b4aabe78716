//! Brainy Control - CLI client for the Brainy Tutor service.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never mix with tutor output; silent unless
    // RUST_LOG asks otherwise.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = brainyctl::cli::Cli::parse();
    brainyctl::commands::run(cli).await
}
