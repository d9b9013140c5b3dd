use std::{net::SocketAddr, path::Path};

use anyhow::Context;
use config::{Environment, File, FileFormat};
use email_address::EmailAddress;
use serde::Deserialize;
use url::Url;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Environment variable containing a colon separated list of additional
/// config files.
pub const CONFIG_PATHS_VAR: &str = "TAXAI_CONFIG";

/// Prefix of environment variables overriding single config values, e.g.
/// `TAXAI__RECAPTCHA__SECRET`.
pub const ENV_PREFIX: &str = "TAXAI";

/// Environment variables used by the original serverless deployment and the
/// config keys they map to.
const LEGACY_ENV_VARS: &[(&str, &str)] = &[
    ("ALLOWED_ORIGIN", "http.allowed_origin"),
    ("RECAPTCHA_SECRET_KEY", "recaptcha.secret"),
    ("GOOGLE_SPREADSHEET_ID", "sheets.spreadsheet_id"),
    ("GOOGLE_SERVICE_ACCOUNT_EMAIL", "sheets.service_account_email"),
    ("GOOGLE_PRIVATE_KEY", "sheets.private_key"),
    ("RESEND_API_KEY", "email.api_key"),
    ("CONTACT_EMAIL_FROM", "email.from"),
    ("CONTACT_EMAIL_TO", "email.recipient"),
];

/// Load the default config file, the files listed in `TAXAI_CONFIG` and all
/// overrides from the environment.
pub fn load() -> anyhow::Result<Config> {
    let extra_paths = std::env::var(CONFIG_PATHS_VAR).unwrap_or_default();
    let paths = std::iter::once(DEFAULT_CONFIG_PATH)
        .chain(extra_paths.split(':').filter(|x| !x.is_empty()))
        .collect::<Vec<_>>();

    let legacy = LEGACY_ENV_VARS
        .iter()
        .filter_map(|&(var, key)| {
            std::env::var(var)
                .ok()
                .filter(|value| !value.is_empty())
                .map(|value| (key, value))
        })
        .collect::<Vec<_>>();

    build(&paths, &legacy, Some(Environment::with_prefix(ENV_PREFIX).separator("__")))
}

/// Load the given config files only.
pub fn load_paths(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    build(paths, &[], None)
}

/// Load the given config files and apply additional toml snippets on top.
pub fn load_with_override(
    paths: &[impl AsRef<Path>],
    overrides: &[&str],
) -> anyhow::Result<Config> {
    overrides
        .iter()
        .fold(builder(paths)?, |builder, x| {
            builder.add_source(File::from_str(x, FileFormat::Toml))
        })
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

fn build(
    paths: &[impl AsRef<Path>],
    overrides: &[(&str, String)],
    environment: Option<Environment>,
) -> anyhow::Result<Config> {
    let mut builder = builder(paths)?;
    if let Some(environment) = environment {
        builder = builder.add_source(environment);
    }
    for (key, value) in overrides {
        builder = builder
            .set_override(*key, value.as_str())
            .with_context(|| format!("Failed to override config value {key}"))?;
    }

    builder
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

fn builder(
    paths: &[impl AsRef<Path>],
) -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
    paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub contact: ContactConfig,
    pub sheets: SheetsConfig,
    pub email: EmailConfig,
    pub recaptcha: Option<RecaptchaConfig>,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub address: SocketAddr,
    pub path: String,
    pub allowed_origin: String,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub delivery: DeliveryProvider,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryProvider {
    Sheets,
    Email,
}

#[derive(Deserialize)]
pub struct SheetsConfig {
    pub spreadsheet_id: Option<String>,
    pub range: String,
    pub service_account_email: Option<String>,
    pub private_key: Option<String>,
    pub token_endpoint_override: Option<Url>,
    pub api_endpoint_override: Option<Url>,
}

#[derive(Deserialize)]
pub struct EmailConfig {
    pub api_key: Option<String>,
    pub from: Option<EmailAddress>,
    pub recipient: Option<EmailAddress>,
    pub subject: String,
    pub endpoint_override: Option<Url>,
}

#[derive(Deserialize)]
pub struct RecaptchaConfig {
    pub secret: String,
    pub siteverify_endpoint_override: Option<Url>,
}

impl std::fmt::Debug for SheetsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetsConfig")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("range", &self.range)
            .field("service_account_email", &self.service_account_email)
            .field("private_key", &self.private_key.as_ref().map(|_| "[redacted]"))
            .field("token_endpoint_override", &self.token_endpoint_override)
            .field("api_endpoint_override", &self.api_endpoint_override)
            .finish()
    }
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("from", &self.from)
            .field("recipient", &self.recipient)
            .field("subject", &self.subject)
            .field("endpoint_override", &self.endpoint_override)
            .finish()
    }
}

impl std::fmt::Debug for RecaptchaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecaptchaConfig")
            .field("secret", &"[redacted]")
            .field(
                "siteverify_endpoint_override",
                &self.siteverify_endpoint_override,
            )
            .finish()
    }
}
