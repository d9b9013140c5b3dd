use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use taxai_core_contact_contracts::ContactFeatureService;
use taxai_di::Build;
use tokio::net::TcpListener;
use tracing::info;

pub use function::{ContactFunction, ContactFunctionConfig, FunctionEvent, FunctionResponse};

pub mod function;
mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone, Build)]
pub struct RestServer<Contact> {
    function: ContactFunction<Contact>,
    config: RestServerConfig,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub address: SocketAddr,
    /// Path the contact function is mounted on.
    pub path: Arc<str>,
}

impl<Contact> RestServer<Contact>
where
    Contact: ContactFeatureService,
{
    pub async fn serve(self) -> anyhow::Result<()> {
        let address = self.config.address;
        let path = self.config.path.clone();
        let router = self.router();

        let listener = TcpListener::bind(address)
            .await
            .with_context(|| format!("Failed to bind to {address}"))?;
        info!("Contact function listening on http://{address}{path}");

        axum::serve(listener, router).await.map_err(Into::into)
    }

    fn router(self) -> Router<()> {
        let allowed_origin = self.function.allowed_origin();

        let router = routes::contact::router(&self.config.path, self.function.into());
        let router = middlewares::panic_handler::add(router, allowed_origin);
        let router = middlewares::trace::add(router);
        middlewares::request_id::add(router)
    }
}
