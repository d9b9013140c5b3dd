use std::sync::Arc;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use taxai_di::Build;
use taxai_extern_contracts::email::{Email, EmailApiService};
use taxai_utils::trace_instrument;
use url::Url;

use crate::http::{ensure_success, HttpClient};

const EMAIL_ENDPOINT: &str = "https://api.resend.com/emails";

#[derive(Debug, Clone, Build)]
pub struct EmailApiServiceImpl {
    config: EmailApiServiceConfig,
    #[state]
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct EmailApiServiceConfig {
    endpoint: Arc<Url>,
}

impl EmailApiServiceConfig {
    pub fn new(endpoint_override: Option<Url>) -> Self {
        Self {
            endpoint: endpoint_override
                .unwrap_or_else(|| EMAIL_ENDPOINT.parse().unwrap())
                .into(),
        }
    }
}

impl EmailApiService for EmailApiServiceImpl {
    #[trace_instrument(skip(self, api_key, email), fields(to = %email.to))]
    async fn send(&self, api_key: &str, email: Email) -> anyhow::Result<String> {
        let response = self
            .client
            .post((*self.config.endpoint).clone())
            .bearer_auth(api_key)
            .json(&SendEmailRequest {
                from: &email.from,
                to: [&email.to],
                subject: &email.subject,
                html: &email.html,
                reply_to: email.reply_to.as_deref(),
            })
            .send()
            .await
            .context("Failed to send request to email api")?;

        ensure_success(response, "Email api")
            .await?
            .json::<SendEmailResponse>()
            .await
            .map(|response| response.id)
            .context("Failed to parse email api response")
    }
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: String,
}
