use serde::Serialize;

/// Body of every error response.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub message: String,
}
