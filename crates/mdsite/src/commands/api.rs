//! Upload API server command.

use anyhow::Result;
use mdsite_server::{ApiServer, ApiServerConfig};

/// Run the upload API server.
pub async fn run(config: ApiServerConfig) -> Result<()> {
    tracing::info!("Starting upload API on port {}", config.port);

    ApiServer::new(config).start().await?;

    Ok(())
}
