//! HTTP server
//!
//! A thin axum router over [`AppState`]. Fixed endpoints are routed
//! explicitly; every other path goes through the route table, which decides
//! between a page, a print variant, a redirect and the not-found page.

mod handlers;
mod state;

pub use handlers::{ClientEvent, QueryPairs, filter_from_query, roi_inputs_from_query};
pub use state::{AppState, SharedState};

use std::net::SocketAddr;

use axum::Router;
use axum::routing::{get, post};
use eyre::{Context, Result};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

/// Build the application router
pub fn router(state: SharedState) -> Router {
    debug!("router: called");
    Router::new()
        .route("/healthz", get(handlers::healthz))
        .route("/assets/{file}", get(handlers::asset))
        .route("/prompts/download.md", get(handlers::download_markdown))
        .route("/prompts/download.html", get(handlers::download_print))
        .route("/api/roi", get(handlers::api_roi))
        .route("/api/events", post(handlers::api_events))
        .fallback(handlers::page)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until ctrl-c
pub async fn serve(state: SharedState, bind: &str) -> Result<()> {
    debug!(%bind, "serve: called");
    let addr: SocketAddr = bind.parse().context(format!("Invalid bind address: {}", bind))?;
    let listener = TcpListener::bind(addr)
        .await
        .context(format!("Failed to bind {}", addr))?;
    let local = listener.local_addr().context("Failed to read local address")?;
    info!("Serving on http://{}", local);
    println!("Serving on http://{}", local);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
