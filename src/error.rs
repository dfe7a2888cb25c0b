//! Error taxonomy for the activities API.
//!
//! Every failure is terminal for its request and surfaces as a JSON body
//! of the form `{"detail": "<message>"}` with the matching status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced to API callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Bad credentials, or a missing/unknown session token.
    #[error("{0}")]
    Unauthorized(String),

    /// Unknown activity name.
    #[error("{0}")]
    NotFound(String),

    /// Duplicate signup, or unregister of a non-member.
    #[error("{0}")]
    Conflict(String),
}

impl ApiError {
    /// HTTP status for this error. Conflicts answer 400 on the wire,
    /// which is what clients of this API expect for duplicate-signup
    /// and not-signed-up failures.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            detail: self.to_string(),
        });
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_taxonomy() {
        let unauthorized = ApiError::Unauthorized("Not authenticated".into());
        let not_found = ApiError::NotFound("Activity not found".into());
        let conflict = ApiError::Conflict("Student is already signed up".into());

        assert_eq!(unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(conflict.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn message_is_the_display_form() {
        let err = ApiError::NotFound("Activity not found".into());
        assert_eq!(err.to_string(), "Activity not found");
    }
}
