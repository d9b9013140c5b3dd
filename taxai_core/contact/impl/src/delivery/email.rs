use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, SecondsFormat, Utc};
use email_address::EmailAddress;
use taxai_core_contact_contracts::delivery::{ContactDeliveryError, ContactDeliveryService};
use taxai_di::Build;
use taxai_extern_contracts::email::{Email, EmailApiService};
use taxai_models::{contact::ContactSubmission, language::Language};
use taxai_templates_contracts::{ContactEmailTemplate, TemplateService};
use taxai_utils::trace_instrument;
use tracing::{error, info};

/// Sends every submission as an html email to the operators.
#[derive(Debug, Clone, Build)]
pub struct ContactEmailDeliveryServiceImpl<EmailApi, Template> {
    email_api: EmailApi,
    template: Template,
    config: ContactEmailDeliveryServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ContactEmailDeliveryServiceConfig {
    pub api_key: Option<Arc<str>>,
    pub from: Option<Arc<EmailAddress>>,
    pub recipient: Option<Arc<EmailAddress>>,
    pub subject: Arc<str>,
}

impl<EmailApi, Template> ContactDeliveryService
    for ContactEmailDeliveryServiceImpl<EmailApi, Template>
where
    EmailApi: EmailApiService,
    Template: TemplateService,
{
    #[trace_instrument(skip(self, submission))]
    async fn deliver(
        &self,
        submission: &ContactSubmission,
        submitted_at: DateTime<Utc>,
    ) -> Result<(), ContactDeliveryError> {
        let Some(api_key) = &self.config.api_key else {
            error!("No email api key has been configured");
            return Err(ContactDeliveryError::Configuration("email.api_key"));
        };
        let (Some(from), Some(recipient)) = (&self.config.from, &self.config.recipient) else {
            error!("Email sender or recipient has not been configured");
            return Err(ContactDeliveryError::Configuration("email.from / email.recipient"));
        };

        let html = self
            .template
            .render(&ContactEmailTemplate {
                name: (*submission.name).clone(),
                company: submission.company.clone(),
                email: (*submission.email).clone(),
                inquiry_type: submission.inquiry_type.label(Language::Ko).into(),
                message: submission.message.replace('\n', "<br>"),
                submitted_at: submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            })
            .context("Failed to render contact email")?;

        let id = self
            .email_api
            .send(
                api_key,
                Email {
                    from: from.to_string(),
                    to: recipient.to_string(),
                    subject: self.config.subject.to_string(),
                    html,
                    reply_to: Some((*submission.email).clone()),
                },
            )
            .await
            .context("Failed to send contact email")?;

        info!(%id, "Contact email sent");

        Ok(())
    }
}
