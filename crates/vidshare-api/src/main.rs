//! vidshare API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p vidshare-api
//! ```
//!
//! Configuration is loaded from environment variables and an optional `.env` file.

use anyhow::Context;
use tracing::{error, info};
use vidshare_common::{try_init_tracing, AppConfig, TracingConfig};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = %format!("{e:#}"), "Server failed");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("failed to load configuration")?;

    if let Err(e) = try_init_tracing(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        name = %config.app.name,
        env = ?config.app.env,
        address = %config.api.address(),
        "Configuration loaded"
    );

    vidshare_api::run(config).await?;
    Ok(())
}
