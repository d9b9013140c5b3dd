use std::{panic::AssertUnwindSafe, sync::Arc};

use axum::{
    extract::{Request, State},
    middleware::{from_fn_with_state, Next},
    response::{IntoResponse, Response},
    Router,
};
use futures::FutureExt;
use tracing::error;

use crate::function::internal_server_error;

/// Turn panics in the handler into a 500 response that still carries the
/// CORS headers.
pub fn add<S: Clone + Send + Sync + 'static>(
    router: Router<S>,
    allowed_origin: Arc<str>,
) -> Router<S> {
    router.layer(from_fn_with_state(allowed_origin, middleware))
}

async fn middleware(
    State(allowed_origin): State<Arc<str>>,
    request: Request,
    next: Next,
) -> Response {
    match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => response,
        Err(_) => {
            error!("request handler panicked");
            internal_server_error(&allowed_origin).into_response()
        }
    }
}
