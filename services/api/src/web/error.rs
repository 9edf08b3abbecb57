//! services/api/src/web/error.rs
//!
//! Maps port errors onto HTTP responses. Every error body is a JSON object
//! of the form `{"message": "..."}`, matching the original wire format.

use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::error;
use utoipa::ToSchema;

use all_islam_core::ports::PortError;

/// The JSON body returned for every failed request.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub message: String,
}

/// A request-scoped error with a fixed mapping to a status code.
#[derive(Debug)]
pub enum WebError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Internal,
}

impl From<PortError> for WebError {
    fn from(e: PortError) -> Self {
        match e {
            PortError::NotFound(msg) => WebError::NotFound(msg),
            PortError::Conflict(msg) => WebError::Conflict(msg),
            PortError::Unexpected(msg) => {
                // The detail is logged here and never leaked to the client.
                error!("Store operation failed: {}", msg);
                WebError::Internal
            }
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            WebError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            WebError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            WebError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            WebError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };
        (status, Json(ErrorBody { message })).into_response()
    }
}

/// A JSON body extractor whose rejections are always 400s. Axum's stock
/// `Json` answers 422 for deserialization failures, but a body missing a
/// required field is a plain validation error here.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(WebError::BadRequest(rejection.body_text())),
        }
    }
}

/// Parses a path segment as a record id; anything non-numeric is a 400, not
/// a silent fallthrough to another lookup.
pub fn parse_id(raw: &str) -> Result<i64, WebError> {
    raw.parse::<i64>()
        .map_err(|_| WebError::BadRequest("Invalid ID".to_string()))
}
