use std::str::FromStr;

use chrono::{SecondsFormat, Utc};
use taxai_models::contact::{ContactFormData, InquiryType};
use tracing::{error, info};

use crate::{
    api::{ContactApi, ContactApiError, ContactApiResponse},
    banner::StatusBanner,
};

/// State machine behind the contact form.
///
/// The form starts out idle, is edited field by field and then submitted.
/// The outcome of the last submit attempt is kept until the next attempt.
#[derive(Debug)]
pub struct ContactForm<Api> {
    api: Api,
    config: ContactFormConfig,
    data: ContactFormData,
    status: FormStatus,
    captcha_resets: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFormConfig {
    /// Site key of the captcha widget. If set, a captcha token is required
    /// before the form can be submitted.
    pub captcha_site_key: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
    CaptchaRequired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Company,
    Email,
    InquiryType,
    Message,
}

impl FromStr for FormField {
    type Err = UnknownFormField;

    /// Parse the `name` attribute of a form input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "company" => Ok(Self::Company),
            "email" => Ok(Self::Email),
            "inquiryType" => Ok(Self::InquiryType),
            "message" => Ok(Self::Message),
            _ => Err(UnknownFormField),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Unknown form field")]
pub struct UnknownFormField;

fn empty_form() -> ContactFormData {
    ContactFormData {
        inquiry_type: InquiryType::default().as_str().into(),
        ..Default::default()
    }
}

impl<Api: ContactApi> ContactForm<Api> {
    pub fn new(api: Api, config: ContactFormConfig) -> Self {
        Self {
            api,
            config,
            data: empty_form(),
            status: FormStatus::Idle,
            captcha_resets: 0,
        }
    }

    pub fn data(&self) -> &ContactFormData {
        &self.data
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.data.name,
            FormField::Company => &self.data.company,
            FormField::Email => &self.data.email,
            FormField::InquiryType => &self.data.inquiry_type,
            FormField::Message => &self.data.message,
        }
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.data.name = value,
            FormField::Company => self.data.company = value,
            FormField::Email => self.data.email = value,
            FormField::InquiryType => self.data.inquiry_type = value,
            FormField::Message => self.data.message = value,
        }
    }

    /// Called by the captcha widget when it is completed (`Some`) or when the
    /// token expires (`None`).
    pub fn set_captcha_token(&mut self, token: Option<String>) {
        self.data.captcha_token = token;
    }

    pub fn captcha_token(&self) -> Option<&str> {
        self.data.captcha_token.as_deref()
    }

    pub fn is_captcha_enabled(&self) -> bool {
        self.config.captcha_site_key.is_some()
    }

    /// Incremented every time the captcha widget has to be reset.
    pub fn captcha_resets(&self) -> u64 {
        self.captcha_resets
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn banner(&self) -> Option<StatusBanner> {
        StatusBanner::from_status(self.status)
    }

    pub fn is_submit_disabled(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    pub fn api(&self) -> &Api {
        &self.api
    }

    /// Submit the form and wait for the contact function to respond.
    pub async fn submit(&mut self) -> FormStatus {
        let Some(form) = self.start_submit() else {
            return self.status;
        };
        let result = self.api.submit(&form).await;
        self.finish_submit(result)
    }

    /// First half of [`submit`](Self::submit).
    ///
    /// Returns the payload to post, stamped with the client clock, and
    /// disables the submit control until [`finish_submit`](Self::finish_submit)
    /// is called. Returns `None` if a captcha token is required but missing.
    pub fn start_submit(&mut self) -> Option<ContactFormData> {
        let token_missing = self
            .data
            .captcha_token
            .as_deref()
            .map_or(true, str::is_empty);
        if self.is_captcha_enabled() && token_missing {
            self.status = FormStatus::CaptchaRequired;
            return None;
        }

        self.status = FormStatus::Submitting;

        Some(ContactFormData {
            timestamp: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
            ..self.data.clone()
        })
    }

    /// Second half of [`submit`](Self::submit): apply the response of the
    /// contact function.
    pub fn finish_submit(
        &mut self,
        result: Result<ContactApiResponse, ContactApiError>,
    ) -> FormStatus {
        self.status = match result {
            Ok(response) if response.success => {
                info!("contact form submitted");
                self.data = empty_form();
                self.captcha_resets += 1;
                FormStatus::Success
            }
            Ok(response) => {
                error!(
                    error = response.error.as_deref().unwrap_or("Unknown error"),
                    "Form submission error"
                );
                FormStatus::Error
            }
            Err(err) => {
                error!("Form submission error: {err:#}");
                FormStatus::Error
            }
        };

        self.status
    }
}
