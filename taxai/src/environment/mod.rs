use std::sync::Arc;

use anyhow::ensure;
use taxai_api_rest::{ContactFunctionConfig, RestServerConfig};
use taxai_config::{Config, DeliveryProvider};
use taxai_core_contact_impl::delivery::{
    email::ContactEmailDeliveryServiceConfig, sheets::ContactSheetsDeliveryServiceConfig,
    ContactDeliveryProvider, ContactDeliveryServiceConfig,
};
use taxai_di::{provider, Provides};
use taxai_extern_contracts::sheets::ServiceAccount;
use taxai_extern_impl::{
    email::EmailApiServiceConfig, recaptcha::RecaptchaApiServiceConfig,
    sheets::SheetsApiServiceConfig,
};
use taxai_shared_contracts::captcha::CaptchaService;
use taxai_shared_impl::captcha::{CaptchaServiceConfig, RecaptchaCaptchaServiceConfig};
use types::Captcha;

pub mod types;

provider! {
    /// The default provider, capable of providing all the dependencies
    pub Provider {
        // API
        rest_server_config: RestServerConfig,
        contact_function_config: ContactFunctionConfig,

        // Extern
        recaptcha_api_service_config: RecaptchaApiServiceConfig,
        sheets_api_service_config: SheetsApiServiceConfig,
        email_api_service_config: EmailApiServiceConfig,

        // Shared
        captcha_service_config: CaptchaServiceConfig,

        // Core
        contact_delivery_service_config: ContactDeliveryServiceConfig,
        contact_sheets_delivery_service_config: ContactSheetsDeliveryServiceConfig,
        contact_email_delivery_service_config: ContactEmailDeliveryServiceConfig,
    }
}

impl Provider {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        // API
        ensure!(
            config.http.path.starts_with('/'),
            "http.path must start with a '/'"
        );
        let rest_server_config = RestServerConfig {
            address: config.http.address,
            path: config.http.path.as_str().into(),
        };

        let contact_function_config = ContactFunctionConfig {
            allowed_origin: config.http.allowed_origin.as_str().into(),
        };

        // Extern
        let recaptcha_api_service_config = RecaptchaApiServiceConfig::new(
            config
                .recaptcha
                .as_ref()
                .and_then(|recaptcha| recaptcha.siteverify_endpoint_override.clone()),
        );

        let sheets_api_service_config = SheetsApiServiceConfig::new(
            config.sheets.token_endpoint_override.clone(),
            config.sheets.api_endpoint_override.clone(),
        );

        let email_api_service_config =
            EmailApiServiceConfig::new(config.email.endpoint_override.clone());

        // Shared
        let captcha_service_config = match config.recaptcha.as_ref() {
            Some(recaptcha) if !recaptcha.secret.is_empty() => {
                CaptchaServiceConfig::Recaptcha(RecaptchaCaptchaServiceConfig {
                    secret: recaptcha.secret.as_str().into(),
                })
            }
            _ => CaptchaServiceConfig::Disabled,
        };

        // Core
        let contact_delivery_service_config = ContactDeliveryServiceConfig {
            provider: match config.contact.delivery {
                DeliveryProvider::Sheets => ContactDeliveryProvider::Sheets,
                DeliveryProvider::Email => ContactDeliveryProvider::Email,
            },
        };

        let service_account = config
            .sheets
            .service_account_email
            .as_ref()
            .zip(config.sheets.private_key.as_ref())
            .map(|(client_email, private_key)| {
                Arc::new(ServiceAccount {
                    client_email: client_email.clone(),
                    private_key: unescape_private_key(private_key),
                })
            });
        let contact_sheets_delivery_service_config = ContactSheetsDeliveryServiceConfig {
            spreadsheet_id: config.sheets.spreadsheet_id.as_deref().map(Into::into),
            range: config.sheets.range.as_str().into(),
            service_account,
        };

        let contact_email_delivery_service_config = ContactEmailDeliveryServiceConfig {
            api_key: config.email.api_key.as_deref().map(Into::into),
            from: config.email.from.clone().map(Arc::new),
            recipient: config.email.recipient.clone().map(Arc::new),
            subject: config.email.subject.as_str().into(),
        };

        Ok(Self {
            _cache: Default::default(),
            rest_server_config,
            contact_function_config,
            recaptcha_api_service_config,
            sheets_api_service_config,
            email_api_service_config,
            captcha_service_config,
            contact_delivery_service_config,
            contact_sheets_delivery_service_config,
            contact_email_delivery_service_config,
        })
    }

    /// Whether submissions have to carry a valid captcha token.
    pub fn is_captcha_enabled(&mut self) -> bool {
        let captcha: Captcha = self.provide();
        captcha.is_enabled()
    }
}

/// Private keys stored in environment variables usually have their line
/// breaks escaped as `\n`.
fn unescape_private_key(private_key: &str) -> String {
    private_key.replace("\\n", "\n")
}
