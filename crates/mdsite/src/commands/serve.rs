//! Development server command.

use anyhow::Result;
use mdsite_server::{DevServer, DevServerConfig};

/// Run the dev server.
pub async fn run(config: DevServerConfig) -> Result<()> {
    tracing::info!("Starting development server on port {}", config.port);

    DevServer::new(config).start().await?;

    Ok(())
}
