use sensorhub::{HubConfig, HubError, Server};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), HubError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Read configuration from environment variables
    let config = HubConfig::from_env()?;
    info!(host = %config.host, topology = ?config.topology, "Starting hub");

    Server::new(config).run().await?;

    Ok(())
}
