use std::sync::Arc;

use axum::{extract::State, routing, Form, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const SITEVERIFY_ROUTE: &str = "/recaptcha/api/siteverify";

/// The only token accepted by the fake siteverify endpoint.
pub const VALID_RESPONSE: &str = "success";

pub fn router(secret: String) -> Router {
    Router::new()
        .route(SITEVERIFY_ROUTE, routing::post(siteverify))
        .with_state(Arc::<str>::from(secret))
}

pub fn log_usage(secret: &str) {
    info!("Recaptcha siteverify endpoint: {SITEVERIFY_ROUTE}");
    info!("Secret: {secret:?}");
    info!("The only valid recaptcha response is {VALID_RESPONSE:?}");
}

#[derive(Deserialize)]
struct SiteverifyRequest {
    secret: String,
    response: String,
}

#[derive(Serialize)]
struct SiteverifyResponse {
    success: bool,
    #[serde(rename = "error-codes", skip_serializing_if = "Vec::is_empty")]
    error_codes: Vec<&'static str>,
}

async fn siteverify(
    state: State<Arc<str>>,
    Form(SiteverifyRequest { secret, response }): Form<SiteverifyRequest>,
) -> Json<SiteverifyResponse> {
    let mut error_codes = Vec::new();
    if *secret != **state {
        error_codes.push("invalid-input-secret");
    }
    if response != VALID_RESPONSE {
        error_codes.push("invalid-input-response");
    }

    Json(SiteverifyResponse {
        success: error_codes.is_empty(),
        error_codes,
    })
}
