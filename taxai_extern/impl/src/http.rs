use std::{ops::Deref, sync::LazyLock};

use anyhow::bail;
use reqwest::Response;
use taxai_utils::taxai_version;
use tracing::warn;

pub static USER_AGENT: LazyLock<String> =
    LazyLock::new(|| format!("TaxAI Contact Backend (Version {})", taxai_version()));

/// Shared http client of all extern api services.
#[derive(Debug, Clone)]
pub struct HttpClient(reqwest::Client);

impl Deref for HttpClient {
    type Target = reqwest::Client;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(&*USER_AGENT)
            .build()
            .unwrap_or_else(|err| {
                warn!("Failed to build http client, falling back to defaults: {err}");
                reqwest::Client::new()
            });
        Self(client)
    }
}

/// Fail with the status code and the response body if the request was not
/// successful.
pub async fn ensure_success(response: Response, api: &str) -> anyhow::Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    bail!("{api} responded with {status}: {body}");
}
