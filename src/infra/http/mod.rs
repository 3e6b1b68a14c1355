mod admin;
mod middleware;

pub use admin::{AdminState, build_admin_router};

use std::net::SocketAddr;

use axum::Router;
use tracing::info;

use super::error::InfraError;

/// Bind and serve the admin console until the process is stopped.
pub async fn serve(addr: SocketAddr, router: Router) -> Result<(), InfraError> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(target = "penna::http", %addr, "admin console listening");
    axum::serve(listener, router).await?;
    Ok(())
}
