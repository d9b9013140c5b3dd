use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing, Router,
};
use taxai_core_contact_contracts::ContactFeatureService;
use tracing::warn;

use crate::function::{ContactFunction, FunctionEvent, FunctionResponse};

/// Route every method on `path` through the contact function.
pub fn router<Contact: ContactFeatureService>(
    path: &str,
    function: Arc<ContactFunction<Contact>>,
) -> Router<()> {
    Router::new()
        .route(path, routing::any(submit_contact::<Contact>))
        .with_state(function)
}

async fn submit_contact<Contact: ContactFeatureService>(
    function: State<Arc<ContactFunction<Contact>>>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let event = FunctionEvent {
        http_method: method.to_string(),
        headers: headers
            .iter()
            .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_owned())))
            .collect(),
        body: (!body.is_empty()).then(|| String::from_utf8_lossy(&body).into_owned()),
        is_base64_encoded: false,
    };

    function.handle(event).await.into_response()
}

impl IntoResponse for FunctionResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or_else(|_| {
            warn!(status_code = self.status_code, "invalid status code");
            StatusCode::INTERNAL_SERVER_ERROR
        });

        let mut response = (status, self.body).into_response();
        for (name, value) in self.headers {
            match (HeaderName::try_from(name), HeaderValue::try_from(value)) {
                (Ok(name), Ok(value)) => {
                    response.headers_mut().insert(name, value);
                }
                (name, value) => warn!(?name, ?value, "dropping invalid response header"),
            }
        }
        response
    }
}
