use std::sync::Arc;

use anyhow::{anyhow, Context};
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use taxai_di::Build;
use taxai_extern_contracts::sheets::{ServiceAccount, SheetsApiService};
use taxai_utils::trace_instrument;
use url::Url;

use crate::http::{ensure_success, HttpClient};

const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const API_ENDPOINT: &str = "https://sheets.googleapis.com/";
const SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_TTL_SECS: i64 = 3600;

#[derive(Debug, Clone, Build)]
pub struct SheetsApiServiceImpl {
    config: SheetsApiServiceConfig,
    #[state]
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct SheetsApiServiceConfig {
    token_endpoint: Arc<Url>,
    api_endpoint: Arc<Url>,
}

impl SheetsApiServiceConfig {
    pub fn new(token_endpoint_override: Option<Url>, api_endpoint_override: Option<Url>) -> Self {
        Self {
            token_endpoint: token_endpoint_override
                .unwrap_or_else(|| TOKEN_ENDPOINT.parse().unwrap())
                .into(),
            api_endpoint: api_endpoint_override
                .unwrap_or_else(|| API_ENDPOINT.parse().unwrap())
                .into(),
        }
    }
}

impl SheetsApiService for SheetsApiServiceImpl {
    #[trace_instrument(skip(self, row))]
    async fn append_row(
        &self,
        service_account: &ServiceAccount,
        spreadsheet_id: &str,
        range: &str,
        row: Vec<String>,
    ) -> anyhow::Result<()> {
        let access_token = self.fetch_access_token(service_account).await?;

        let response = self
            .client
            .post(self.append_url(spreadsheet_id, range)?)
            .query(&[("valueInputOption", "USER_ENTERED")])
            .bearer_auth(access_token)
            .json(&AppendRequest { values: [row] })
            .send()
            .await
            .context("Failed to send append request")?;
        ensure_success(response, "Sheets api")
            .await
            .context("Failed to append row to spreadsheet")?;

        Ok(())
    }
}

impl SheetsApiServiceImpl {
    /// Exchange a signed service account assertion for an access token.
    async fn fetch_access_token(&self, service_account: &ServiceAccount) -> anyhow::Result<String> {
        let now = Utc::now().timestamp();
        let claims = AssertionClaims {
            iss: &service_account.client_email,
            scope: SCOPE,
            aud: self.config.token_endpoint.as_str(),
            iat: now,
            exp: now + ASSERTION_TTL_SECS,
        };

        let key = EncodingKey::from_rsa_pem(service_account.private_key.as_bytes())
            .context("Failed to load service account private key")?;
        let assertion = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &key)
            .context("Failed to sign service account assertion")?;

        let response = self
            .client
            .post((*self.config.token_endpoint).clone())
            .form(&TokenRequest {
                grant_type: JWT_BEARER_GRANT_TYPE,
                assertion: &assertion,
            })
            .send()
            .await
            .context("Failed to send token request")?;

        ensure_success(response, "Token endpoint")
            .await
            .context("Failed to obtain access token for service account")?
            .json::<TokenResponse>()
            .await
            .map(|response| response.access_token)
            .context("Failed to parse token response")
    }

    fn append_url(&self, spreadsheet_id: &str, range: &str) -> anyhow::Result<Url> {
        let mut url = (*self.config.api_endpoint).clone();
        url.path_segments_mut()
            .map_err(|()| anyhow!("Invalid sheets api endpoint"))?
            .pop_if_empty()
            .extend([
                "v4",
                "spreadsheets",
                spreadsheet_id,
                "values",
                &format!("{range}:append"),
            ]);
        Ok(url)
    }
}

#[derive(Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    grant_type: &'a str,
    assertion: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Serialize)]
struct AppendRequest {
    values: [Vec<String>; 1],
}
