//! Fake implementations of the external APIs used by the contact backend,
//! for local development and integration tests.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;

pub mod email;
pub mod recaptcha;
pub mod sheets;

/// Serve `router` on the given address until the process exits.
pub async fn serve(host: IpAddr, port: u16, router: Router) -> anyhow::Result<()> {
    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, router)
        .await
        .context("Failed to start HTTP server")
}

/// Serve `router` on a random local port in the background and return the
/// bound address.
pub async fn spawn(router: Router) -> anyhow::Result<SocketAddr> {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
        .await
        .context("Failed to bind to a local port")?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move { axum::serve(listener, router).await.ok() });
    Ok(addr)
}
