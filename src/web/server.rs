//! HTTP server for the Web API.

use axum::Router;
use tracing::info;

use crate::config::ServerConfig;
use crate::{PlazaError, Result};

/// Bind the configured address and serve the router until the process
/// exits.
pub async fn serve(config: &ServerConfig, router: Router) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Web API listening on {}", addr);

    axum::serve(listener, router)
        .await
        .map_err(|e| PlazaError::Io(e))?;

    Ok(())
}
