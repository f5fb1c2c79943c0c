//! Error responses for the HTTP layer.
//!
//! Bridges [`BookingError`] to status codes and a JSON body of the form
//! `{"status": "error", "code": ..., "error": ...}`.

use crate::error::{BookingError, Entity};
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;

/// Error returned by every HTTP handler
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    #[must_use]
    pub const fn new(status: StatusCode, code: &'static str, message: String) -> Self {
        Self {
            status,
            code,
            message,
        }
    }

    /// 400 for input rejected before it reaches the engine
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_request", message.into())
    }

    /// 404 for a path identifier that cannot name any record
    #[must_use]
    pub fn not_found(entity: Entity, id: impl fmt::Display) -> Self {
        BookingError::not_found(entity, id).into()
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.code
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Status code for each engine error kind
const fn status_for(error: &BookingError) -> StatusCode {
    match error {
        BookingError::NotFound { .. } => StatusCode::NOT_FOUND,
        BookingError::InsufficientInventory { .. }
        | BookingError::DuplicateActiveReservation { .. }
        | BookingError::DuplicateContact { .. }
        | BookingError::NotYourTurn { .. } => StatusCode::CONFLICT,
        BookingError::Expired { .. } => StatusCode::GONE,
        BookingError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        BookingError::Config(_)
        | BookingError::Io(_)
        | BookingError::Serialization(_)
        | BookingError::Custom(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<BookingError> for ApiError {
    fn from(error: BookingError) -> Self {
        Self::new(status_for(&error), error.kind(), error.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    status: &'static str,
    code: &'static str,
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, code = self.code, message = %self.message, "internal server error");
        }

        let body = ErrorResponse {
            status: "error",
            code: self.code,
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (BookingError::not_found(Entity::Booking, "b-1"), StatusCode::NOT_FOUND),
            (
                BookingError::InsufficientInventory { requested: 3, available: 1 },
                StatusCode::CONFLICT,
            ),
            (BookingError::Expired { id: "r-1".into() }, StatusCode::GONE),
            (BookingError::InvalidRequest("zero".into()), StatusCode::BAD_REQUEST),
            (BookingError::custom("boom"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, status) in cases {
            assert_eq!(ApiError::from(error).status(), status);
        }
    }

    #[test]
    fn test_code_is_error_kind() {
        let err = ApiError::from(BookingError::NotYourTurn {
            conference_id: "conf-1".into(),
        });
        assert_eq!(err.code(), "not_your_turn");
        assert_eq!(err.to_string(), "[not_your_turn] Not your turn yet for conference conf-1");
    }
}
