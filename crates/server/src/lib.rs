//! Server crate for the AgriVision recommendation form.
//!
//! This crate binds the pipeline to HTTP: it renders the form, turns a
//! submission into pipeline inputs, and renders the two result panels.
//! No prediction logic lives here.

pub mod form;
pub mod routes;
pub mod state;
pub mod views;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tracing::info;

pub use routes::create_router;
pub use state::AppState;

/// Bind `addr` and serve until the process is stopped
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, create_router(state))
        .await
        .context("Server error")?;
    Ok(())
}
