use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing, Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

pub const TOKEN_ROUTE: &str = "/token";
pub const ACCESS_TOKEN: &str = "fake-access-token";

const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Rows appended to the fake spreadsheets.
#[derive(Debug, Clone, Default)]
pub struct SheetsState(Arc<Mutex<Vec<AppendedRow>>>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendedRow {
    pub spreadsheet_id: String,
    pub range: String,
    pub values: Vec<String>,
}

impl SheetsState {
    pub fn rows(&self) -> Vec<AppendedRow> {
        self.0.lock().map(|rows| rows.clone()).unwrap_or_default()
    }
}

pub fn router(state: SheetsState) -> Router {
    Router::new()
        .route(TOKEN_ROUTE, routing::post(token))
        .route(
            "/v4/spreadsheets/:spreadsheet_id/values/:range",
            routing::post(append),
        )
        .with_state(state)
}

pub fn log_usage() {
    info!("Token endpoint: {TOKEN_ROUTE}");
    info!("Sheets api endpoint: /");
    info!("Any signed jwt bearer assertion is accepted");
}

#[derive(Deserialize)]
struct TokenRequest {
    grant_type: String,
    assertion: String,
}

async fn token(Form(request): Form<TokenRequest>) -> Response {
    if request.grant_type != JWT_BEARER_GRANT_TYPE {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "unsupported_grant_type"})),
        )
            .into_response();
    }

    if request.assertion.split('.').count() != 3 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "invalid_grant"})),
        )
            .into_response();
    }

    Json(json!({
        "access_token": ACCESS_TOKEN,
        "expires_in": 3600,
        "token_type": "Bearer",
    }))
    .into_response()
}

#[derive(Deserialize)]
struct AppendRequest {
    values: Vec<Vec<String>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AppendResponse {
    spreadsheet_id: String,
    updates: AppendUpdates,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AppendUpdates {
    updated_range: String,
    updated_rows: usize,
}

async fn append(
    state: State<SheetsState>,
    Path((spreadsheet_id, range)): Path<(String, String)>,
    headers: HeaderMap,
    Json(request): Json<AppendRequest>,
) -> Response {
    let authorized = headers
        .get("authorization")
        .and_then(|x| x.to_str().ok())
        .is_some_and(|x| x == format!("Bearer {ACCESS_TOKEN}"));
    if !authorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let Some(range) = range.strip_suffix(":append") else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let updated_rows = request.values.len();
    let Ok(mut rows) = state.0.0.lock() else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };
    for values in request.values {
        info!(%spreadsheet_id, %range, ?values, "appending row");
        rows.push(AppendedRow {
            spreadsheet_id: spreadsheet_id.clone(),
            range: range.into(),
            values,
        });
    }

    Json(AppendResponse {
        spreadsheet_id,
        updates: AppendUpdates {
            updated_range: range.into(),
            updated_rows,
        },
    })
    .into_response()
}
