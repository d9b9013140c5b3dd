use std::sync::Arc;

use anyhow::Context;
use serde::Deserialize;
use taxai_di::Build;
use taxai_extern_contracts::recaptcha::{RecaptchaApiService, RecaptchaSiteverifyResponse};
use taxai_utils::trace_instrument;
use tracing::debug;
use url::Url;

use crate::http::{ensure_success, HttpClient};

const SITEVERIFY_ENDPOINT: &str = "https://www.google.com/recaptcha/api/siteverify";

#[derive(Debug, Clone, Build)]
pub struct RecaptchaApiServiceImpl {
    config: RecaptchaApiServiceConfig,
    #[state]
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct RecaptchaApiServiceConfig {
    siteverify_endpoint: Arc<Url>,
}

impl RecaptchaApiServiceConfig {
    pub fn new(siteverify_endpoint_override: Option<Url>) -> Self {
        Self {
            siteverify_endpoint: siteverify_endpoint_override
                .unwrap_or_else(|| SITEVERIFY_ENDPOINT.parse().unwrap())
                .into(),
        }
    }
}

impl RecaptchaApiService for RecaptchaApiServiceImpl {
    #[trace_instrument(skip(self, response, secret))]
    async fn siteverify(
        &self,
        response: &str,
        secret: &str,
    ) -> anyhow::Result<RecaptchaSiteverifyResponse> {
        let http_response = self
            .client
            .post((*self.config.siteverify_endpoint).clone())
            .form(&[("secret", secret), ("response", response)])
            .send()
            .await
            .context("Failed to send siteverify request")?;

        let SiteverifyResponse {
            success,
            error_codes,
            hostname,
        } = ensure_success(http_response, "Siteverify endpoint")
            .await?
            .json()
            .await
            .context("Failed to parse siteverify response")?;

        debug!(success, ?error_codes, ?hostname, "captcha token verified");

        Ok(RecaptchaSiteverifyResponse {
            success,
            error_codes,
        })
    }
}

#[derive(Deserialize)]
struct SiteverifyResponse {
    success: bool,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
    hostname: Option<String>,
}
