use serde::Serialize;

#[derive(Serialize)]
pub struct ApiSuccess {
    pub success: bool,
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct ApiError {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ApiErrorDetails>,
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum ApiErrorDetails {
    Message(String),
    Codes(Vec<String>),
}
