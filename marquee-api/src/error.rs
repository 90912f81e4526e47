use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use marquee_core::booking::ValidationError;
use serde_json::json;

/// The two caller-visible failure classes. Store detail is logged and
/// masked; validation always answers with the one fixed message so no
/// field-level detail leaks either.
#[derive(Debug)]
pub enum ApiError {
    Validation(ValidationError),
    Store(Box<dyn std::error::Error + Send + Sync>),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::Validation(err) => {
                tracing::debug!("Rejected booking: {}", err);
                (StatusCode::BAD_REQUEST, "missing required fields")
            }
            ApiError::Store(err) => {
                tracing::error!("Store failure: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "server error")
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
