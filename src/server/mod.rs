use std::sync::Arc;

use tracing::info;

use crate::data::DataRegistry;

pub mod api;
pub mod routes;

pub use routes::create_router;

/// Serve the query API on `bind_addr` until Ctrl-C.
pub async fn run_server(bind_addr: &str, registry: Arc<DataRegistry>) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!(
        addr = %bind_addr,
        rows = registry.dataset().len(),
        "poptrends server listening"
    );

    axum::serve(listener, create_router(registry))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
