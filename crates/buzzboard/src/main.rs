//! Buzzboard server binary.

use buzzboard::BuzzboardServer;
use tracing_subscriber::EnvFilter;

/// Env var overriding the listen address.
const ADDR_ENV: &str = "BUZZBOARD_ADDR";
const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr = std::env::var(ADDR_ENV)
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string());

    let server = BuzzboardServer::builder().bind(&addr).build().await?;
    tracing::info!(addr = %server.local_addr()?, "listening");

    server.run().await?;
    Ok(())
}
