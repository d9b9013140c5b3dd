use std::future::Future;

use anyhow::Context;
use serde::Deserialize;
use taxai_models::contact::ContactFormData;
use taxai_utils::{taxai_version, trace_instrument};
use thiserror::Error;
use url::Url;

#[cfg_attr(test, mockall::automock)]
pub trait ContactApi: Send + Sync + 'static {
    /// Post a contact form to the contact function.
    fn submit(
        &self,
        form: &ContactFormData,
    ) -> impl Future<Output = Result<ContactApiResponse, ContactApiError>> + Send;
}

/// Body returned by the contact function, both on success and on failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContactApiResponse {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub error: Option<String>,
    pub details: Option<serde_json::Value>,
}

#[derive(Debug, Error)]
pub enum ContactApiError {
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug, Clone)]
pub struct ContactApiClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl ContactApiClient {
    pub fn new(endpoint: Url) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(format!("TaxAI Contact Client (Version {})", taxai_version()))
            .build()
            .context("Failed to build http client")?;
        Ok(Self { client, endpoint })
    }
}

impl ContactApi for ContactApiClient {
    #[trace_instrument(skip(self, form), fields(endpoint = %self.endpoint))]
    async fn submit(&self, form: &ContactFormData) -> Result<ContactApiResponse, ContactApiError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(form)
            .send()
            .await
            .context("Failed to send contact form")?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContactApiError::Status(status.as_u16()));
        }

        response
            .json()
            .await
            .context("Failed to parse contact function response")
            .map_err(Into::into)
    }
}
