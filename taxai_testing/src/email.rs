use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

pub const EMAILS_ROUTE: &str = "/emails";

#[derive(Debug, Clone, Default)]
pub struct EmailState {
    api_key: Arc<str>,
    sent: Arc<Mutex<Vec<SentEmail>>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SentEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    pub reply_to: Option<String>,
}

impl EmailState {
    pub fn new(api_key: impl Into<Arc<str>>) -> Self {
        Self {
            api_key: api_key.into(),
            sent: Default::default(),
        }
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().map(|x| x.clone()).unwrap_or_default()
    }
}

pub fn router(state: EmailState) -> Router {
    Router::new()
        .route(EMAILS_ROUTE, routing::post(send))
        .with_state(state)
}

pub fn log_usage(api_key: &str) {
    info!("Email api endpoint: {EMAILS_ROUTE}");
    info!("Api key: {api_key:?}");
}

async fn send(
    state: State<EmailState>,
    headers: HeaderMap,
    Json(email): Json<SentEmail>,
) -> Response {
    let authorized = headers
        .get("authorization")
        .and_then(|x| x.to_str().ok())
        .and_then(|x| x.strip_prefix("Bearer "))
        .is_some_and(|x| *x == *state.api_key);
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "statusCode": 401,
                "name": "validation_error",
                "message": "API key is invalid",
            })),
        )
            .into_response();
    }

    let Ok(mut sent) = state.sent.lock() else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };
    info!(to = ?email.to, subject = %email.subject, "received email");
    sent.push(email);
    let id = format!("email-{}", sent.len());

    Json(json!({ "id": id })).into_response()
}
