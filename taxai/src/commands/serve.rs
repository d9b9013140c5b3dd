use taxai_config::Config;
use taxai_di::Provides;
use tracing::info;

use crate::environment::{types::RestServer, Provider};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let mut provider = Provider::new(&config)?;
    let server: RestServer = provider.provide();

    info!(
        delivery = ?config.contact.delivery,
        captcha = config.recaptcha.is_some(),
        "Starting contact function server on {}",
        config.http.address
    );
    server.serve().await
}
