//! The contact form submission handler, modelled after a serverless function:
//! one event in, one response out, no state kept between invocations.

use std::{collections::BTreeMap, panic::AssertUnwindSafe, sync::Arc};

use axum::http::StatusCode;
use base64::{engine::general_purpose::STANDARD, Engine};
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use taxai_core_contact_contracts::{
    delivery::ContactDeliveryError, ContactFeatureService, ContactSubmitError,
};
use taxai_di::Build;
use taxai_models::contact::ContactFormData;
use taxai_utils::trace_instrument;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::models::{ApiError, ApiErrorDetails, ApiSuccess};

pub const ALLOWED_HEADERS: &str = "Content-Type";
pub const ALLOWED_METHODS: &str = "POST, OPTIONS";

/// An incoming invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionEvent {
    pub http_method: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum FunctionError {
    #[error("Request body is required")]
    MissingBody,
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

#[derive(Debug, Clone, Build)]
pub struct ContactFunction<Contact> {
    contact: Contact,
    config: ContactFunctionConfig,
}

#[derive(Debug, Clone)]
pub struct ContactFunctionConfig {
    /// Value of the `Access-Control-Allow-Origin` header.
    pub allowed_origin: Arc<str>,
}

impl<Contact> ContactFunction<Contact> {
    pub fn new(contact: Contact, allowed_origin: Arc<str>) -> Self {
        Self {
            contact,
            config: ContactFunctionConfig { allowed_origin },
        }
    }

    pub fn allowed_origin(&self) -> Arc<str> {
        Arc::clone(&self.config.allowed_origin)
    }
}

impl<Contact> ContactFunction<Contact>
where
    Contact: ContactFeatureService,
{
    /// Handle a single invocation.
    ///
    /// Never fails: every outcome, including a panic in one of the services,
    /// is turned into a response carrying the CORS headers.
    #[trace_instrument(skip(self, event), fields(method = %event.http_method))]
    pub async fn handle(&self, event: FunctionEvent) -> FunctionResponse {
        match AssertUnwindSafe(self.dispatch(event)).catch_unwind().await {
            Ok(response) => response,
            Err(_) => {
                error!("contact function panicked");
                internal_server_error(&self.config.allowed_origin)
            }
        }
    }

    async fn dispatch(&self, event: FunctionEvent) -> FunctionResponse {
        match event.http_method.as_str() {
            "OPTIONS" => return self.respond(StatusCode::NO_CONTENT, String::new()),
            "POST" => {}
            _ => return self.error(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed", None),
        }

        let form = match parse_body(event) {
            Ok(form) => form,
            Err(FunctionError::MissingBody) => {
                return self.error(StatusCode::BAD_REQUEST, "Request body is required", None)
            }
            Err(FunctionError::InvalidBody(details)) => {
                return self.error(
                    StatusCode::BAD_REQUEST,
                    "Invalid request body",
                    Some(ApiErrorDetails::Message(details)),
                )
            }
        };

        match self.contact.submit(form).await {
            Ok(()) => {
                info!("contact form submitted");
                self.json(
                    StatusCode::OK,
                    &ApiSuccess {
                        success: true,
                        message: "Form submitted successfully",
                    },
                )
            }
            Err(ContactSubmitError::MissingFields) => self.error(
                StatusCode::BAD_REQUEST,
                "Name, email, and message are required",
                None,
            ),
            Err(ContactSubmitError::CaptchaRequired) => {
                self.error(StatusCode::BAD_REQUEST, "CAPTCHA token is required", None)
            }
            Err(ContactSubmitError::CaptchaFailed { error_codes }) => self.error(
                StatusCode::BAD_REQUEST,
                "CAPTCHA verification failed",
                Some(ApiErrorDetails::Codes(error_codes)),
            ),
            Err(ContactSubmitError::Delivery(ContactDeliveryError::Configuration(setting))) => {
                error!(setting, "contact delivery is not configured");
                self.error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server configuration error",
                    None,
                )
            }
            Err(ContactSubmitError::Delivery(ContactDeliveryError::Other(err))) => {
                error!("Error submitting form: {err:#}");
                self.error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to submit form",
                    Some(ApiErrorDetails::Message(format!("{err:#}"))),
                )
            }
        }
    }

    fn error(
        &self,
        status: StatusCode,
        error: &'static str,
        details: Option<ApiErrorDetails>,
    ) -> FunctionResponse {
        if status.is_client_error() {
            warn!(%status, error, "rejecting contact form submission");
        }
        self.json(status, &ApiError { error, details })
    }

    fn json(&self, status: StatusCode, body: &impl Serialize) -> FunctionResponse {
        match serde_json::to_string(body) {
            Ok(body) => FunctionResponse {
                headers: json_headers(&self.config.allowed_origin),
                ..self.respond(status, body)
            },
            Err(err) => {
                error!("Failed to serialize response: {err}");
                internal_server_error(&self.config.allowed_origin)
            }
        }
    }

    fn respond(&self, status: StatusCode, body: String) -> FunctionResponse {
        FunctionResponse {
            status_code: status.as_u16(),
            headers: cors_headers(&self.config.allowed_origin),
            body,
        }
    }
}

/// Headers attached to every response.
pub fn cors_headers(allowed_origin: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Access-Control-Allow-Origin".into(), allowed_origin.into()),
        ("Access-Control-Allow-Headers".into(), ALLOWED_HEADERS.into()),
        ("Access-Control-Allow-Methods".into(), ALLOWED_METHODS.into()),
    ])
}

fn json_headers(allowed_origin: &str) -> BTreeMap<String, String> {
    let mut headers = cors_headers(allowed_origin);
    headers.insert("Content-Type".into(), "application/json".into());
    headers
}

pub fn internal_server_error(allowed_origin: &str) -> FunctionResponse {
    FunctionResponse {
        status_code: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        headers: json_headers(allowed_origin),
        body: r#"{"error":"Internal server error"}"#.into(),
    }
}

fn parse_body(event: FunctionEvent) -> Result<ContactFormData, FunctionError> {
    let body = event
        .body
        .filter(|body| !body.is_empty())
        .ok_or(FunctionError::MissingBody)?;

    let body = if event.is_base64_encoded {
        STANDARD
            .decode(&body)
            .map_err(|err| FunctionError::InvalidBody(err.to_string()))?
    } else {
        body.into_bytes()
    };

    serde_json::from_slice(&body).map_err(|err| FunctionError::InvalidBody(err.to_string()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use taxai_core_contact_contracts::MockContactFeatureService;
    use taxai_demo::contact::KIM_FORM;

    use super::*;

    const ORIGIN: &str = "https://taxai.example";

    fn sut(contact: MockContactFeatureService) -> ContactFunction<MockContactFeatureService> {
        ContactFunction::new(contact, ORIGIN.into())
    }

    fn post(body: Value) -> FunctionEvent {
        FunctionEvent {
            http_method: "POST".into(),
            body: Some(body.to_string()),
            ..Default::default()
        }
    }

    fn kim() -> Value {
        json!({
            "name": "Kim",
            "company": "Acme",
            "email": "kim@x.com",
            "inquiryType": "service",
            "message": "hello",
            "timestamp": "2024-05-01T09:29:58.123Z",
        })
    }

    fn body(response: &FunctionResponse) -> Value {
        serde_json::from_str(&response.body).unwrap()
    }

    #[tokio::test]
    async fn ok() {
        // Arrange
        let contact = MockContactFeatureService::new().with_submit(KIM_FORM.clone(), Ok(()));

        // Act
        let response = sut(contact).handle(post(kim())).await;

        // Assert
        assert_eq!(response.status_code, 200);
        assert_eq!(
            body(&response),
            json!({"success": true, "message": "Form submitted successfully"})
        );
        assert_eq!(response.headers["Content-Type"], "application/json");
        assert_eq!(response.headers["Access-Control-Allow-Origin"], ORIGIN);
    }

    #[tokio::test]
    async fn options() {
        // Arrange
        let event = FunctionEvent {
            http_method: "OPTIONS".into(),
            ..Default::default()
        };

        // Act
        let response = sut(MockContactFeatureService::new()).handle(event).await;

        // Assert
        assert_eq!(
            response,
            FunctionResponse {
                status_code: 204,
                headers: cors_headers(ORIGIN),
                body: String::new(),
            }
        );
        assert_eq!(response.headers["Access-Control-Allow-Headers"], "Content-Type");
        assert_eq!(response.headers["Access-Control-Allow-Methods"], "POST, OPTIONS");
    }

    #[tokio::test]
    async fn method_not_allowed() {
        // Arrange
        let event = FunctionEvent {
            http_method: "GET".into(),
            ..Default::default()
        };

        // Act
        let response = sut(MockContactFeatureService::new()).handle(event).await;

        // Assert
        assert_eq!(response.status_code, 405);
        assert_eq!(response.body, r#"{"error":"Method not allowed"}"#);
        assert_eq!(response.headers["Access-Control-Allow-Origin"], ORIGIN);
    }

    #[tokio::test]
    async fn missing_body() {
        for request_body in [None, Some(String::new())] {
            // Arrange
            let event = FunctionEvent {
                http_method: "POST".into(),
                body: request_body,
                ..Default::default()
            };

            // Act
            let response = sut(MockContactFeatureService::new()).handle(event).await;

            // Assert
            assert_eq!(response.status_code, 400);
            assert_eq!(body(&response), json!({"error": "Request body is required"}));
        }
    }

    #[tokio::test]
    async fn invalid_body() {
        // Arrange
        let event = FunctionEvent {
            http_method: "POST".into(),
            body: Some("{not json".into()),
            ..Default::default()
        };

        // Act
        let response = sut(MockContactFeatureService::new()).handle(event).await;

        // Assert
        assert_eq!(response.status_code, 400);
        let body = body(&response);
        assert_eq!(body["error"], "Invalid request body");
        assert!(body["details"].is_string());
    }

    #[tokio::test]
    async fn base64_body() {
        // Arrange
        let contact = MockContactFeatureService::new().with_submit(KIM_FORM.clone(), Ok(()));
        let event = FunctionEvent {
            http_method: "POST".into(),
            body: Some(STANDARD.encode(kim().to_string())),
            is_base64_encoded: true,
            ..Default::default()
        };

        // Act
        let response = sut(contact).handle(event).await;

        // Assert
        assert_eq!(response.status_code, 200);
    }

    #[tokio::test]
    async fn missing_fields() {
        // Arrange
        let form = ContactFormData {
            message: String::new(),
            ..KIM_FORM.clone()
        };
        let contact = MockContactFeatureService::new()
            .with_submit(form, Err(ContactSubmitError::MissingFields));

        // Act
        let response = sut(contact)
            .handle(post(json!({
                "name": "Kim",
                "company": "Acme",
                "email": "kim@x.com",
                "inquiryType": "service",
                "message": "",
                "timestamp": "2024-05-01T09:29:58.123Z",
            })))
            .await;

        // Assert
        assert_eq!(response.status_code, 400);
        assert_eq!(
            body(&response),
            json!({"error": "Name, email, and message are required"})
        );
    }

    #[tokio::test]
    async fn captcha_required() {
        // Arrange
        let contact = MockContactFeatureService::new()
            .with_submit(KIM_FORM.clone(), Err(ContactSubmitError::CaptchaRequired));

        // Act
        let response = sut(contact).handle(post(kim())).await;

        // Assert
        assert_eq!(response.status_code, 400);
        assert_eq!(body(&response), json!({"error": "CAPTCHA token is required"}));
    }

    #[tokio::test]
    async fn captcha_failed() {
        // Arrange
        let contact = MockContactFeatureService::new().with_submit(
            KIM_FORM.clone(),
            Err(ContactSubmitError::CaptchaFailed {
                error_codes: vec!["invalid-input-response".into()],
            }),
        );

        // Act
        let response = sut(contact).handle(post(kim())).await;

        // Assert
        assert_eq!(response.status_code, 400);
        assert_eq!(
            body(&response),
            json!({
                "error": "CAPTCHA verification failed",
                "details": ["invalid-input-response"],
            })
        );
    }

    #[tokio::test]
    async fn configuration_error() {
        // Arrange
        let contact = MockContactFeatureService::new().with_submit(
            KIM_FORM.clone(),
            Err(ContactDeliveryError::Configuration("sheets.spreadsheet_id").into()),
        );

        // Act
        let response = sut(contact).handle(post(kim())).await;

        // Assert
        assert_eq!(response.status_code, 500);
        assert_eq!(body(&response), json!({"error": "Server configuration error"}));
    }

    #[tokio::test]
    async fn delivery_error() {
        // Arrange
        let contact = MockContactFeatureService::new().with_submit(
            KIM_FORM.clone(),
            Err(ContactDeliveryError::Other(
                anyhow::anyhow!("quota exceeded").context("Failed to append row"),
            )
            .into()),
        );

        // Act
        let response = sut(contact).handle(post(kim())).await;

        // Assert
        assert_eq!(response.status_code, 500);
        assert_eq!(
            body(&response),
            json!({
                "error": "Failed to submit form",
                "details": "Failed to append row: quota exceeded"
            })
        );
    }

    #[tokio::test]
    async fn panic() {
        // Arrange
        struct PanickingContact;

        impl ContactFeatureService for PanickingContact {
            async fn submit(&self, _form: ContactFormData) -> Result<(), ContactSubmitError> {
                panic!("delivery provider exploded")
            }
        }

        let sut = ContactFunction::new(PanickingContact, ORIGIN.into());

        // Act
        let response = sut.handle(post(kim())).await;

        // Assert
        assert_eq!(response.status_code, 500);
        assert_eq!(body(&response), json!({"error": "Internal server error"}));
        assert_eq!(response.headers["Access-Control-Allow-Origin"], ORIGIN);
    }
}
