use anyhow::{bail, Context};
use clap::Args;
use taxai_client::{ContactApiClient, ContactForm, ContactFormConfig, FormField, FormStatus};
use taxai_config::Config;
use taxai_models::language::Language;
use url::Url;

/// Submit a contact form through the http api, the same way the landing page
/// does.
#[derive(Debug, Args)]
pub struct SubmitCommand {
    /// Url of the contact function [default: the local server]
    #[arg(long)]
    url: Option<Url>,
    #[arg(long)]
    name: String,
    #[arg(long, default_value = "")]
    company: String,
    #[arg(long)]
    email: String,
    #[arg(long, default_value = "service")]
    inquiry_type: String,
    #[arg(long)]
    message: String,
    /// Captcha token obtained from the captcha widget
    #[arg(long)]
    captcha_token: Option<String>,
    /// Require a captcha token before submitting
    #[arg(long)]
    captcha_site_key: Option<String>,
    /// Language of the printed status message
    #[arg(long, default_value = "ko", value_parser = parse_language)]
    language: Language,
}

impl SubmitCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        let url = match self.url {
            Some(url) => url,
            None => format!("http://{}{}", config.http.address, config.http.path)
                .parse()
                .context("Failed to build contact function url")?,
        };

        let mut form = ContactForm::new(
            ContactApiClient::new(url)?,
            ContactFormConfig {
                captcha_site_key: self.captcha_site_key,
            },
        );
        form.set_field(FormField::Name, self.name);
        form.set_field(FormField::Company, self.company);
        form.set_field(FormField::Email, self.email);
        form.set_field(FormField::InquiryType, self.inquiry_type);
        form.set_field(FormField::Message, self.message);
        form.set_captcha_token(self.captcha_token);

        let status = form.submit().await;
        let message = form
            .banner()
            .map(|banner| banner.message(self.language))
            .unwrap_or_default();

        if status != FormStatus::Success {
            bail!("{message}");
        }
        println!("{message}");

        Ok(())
    }
}

fn parse_language(s: &str) -> Result<Language, String> {
    match s {
        "ko" => Ok(Language::Ko),
        "en" => Ok(Language::En),
        _ => Err(format!("unsupported language {s:?}, expected \"ko\" or \"en\"")),
    }
}
