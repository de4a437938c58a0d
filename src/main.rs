//! SSR host for the Buddie frontend.
//!
//! Renders the Leptos app on the server, serves the hydration bundle from
//! `/pkg` and exposes a health check. All data comes from the separate
//! backend the browser talks to directly.

mod config;
mod routes;

use tracing_subscriber::EnvFilter;

use crate::config::HostConfig;
use crate::routes::HostError;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "buddie host stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), HostError> {
    let config = HostConfig::from_env()?;
    let app = routes::app()?;

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| HostError::Bind { addr: addr.clone(), source })?;

    tracing::info!(%addr, "buddie listening");
    axum::serve(listener, app).await.map_err(HostError::Serve)
}
