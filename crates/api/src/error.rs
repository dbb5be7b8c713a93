//! API Error Responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use lead_capture::LeadError;
use serde::Serialize;
use thiserror::Error;

/// Errors a handler can surface to the client
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("session not found or expired")]
    SessionNotFound,

    #[error(transparent)]
    InvalidLead(#[from] LeadError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::SessionNotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidLead(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}
