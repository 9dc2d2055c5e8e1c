//! API error taxonomy.
//!
//! Every failure a handler can produce maps to exactly one variant here,
//! and every variant maps to one HTTP status plus a `{"error": msg}` body.
//! Nothing is retried or locally recovered.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    /// Missing/invalid/expired token, or a token whose subject no longer
    /// resolves to a user. The &str carries the boundary message.
    Unauthorized(&'static str),
    /// Resolved identity's role is not in the route's allowed set.
    Forbidden,
    /// Duplicate email at registration.
    Conflict,
    /// Login failure. One shared message for "no such user" and "wrong
    /// password" so responses don't leak which emails are registered.
    InvalidCredentials,
    /// OTP code mismatch, wrong purpose/target, or expired code.
    InvalidCode,
    /// Malformed request the extractors couldn't reject (e.g. a multipart
    /// body without a file part).
    BadRequest(&'static str),
    /// Store failure. Logged server-side, generic message to the client.
    Internal(anyhow::Error),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden"),
            ApiError::Conflict => (StatusCode::CONFLICT, "Email already registered"),
            ApiError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Incorrect email or password")
            }
            ApiError::InvalidCode => (StatusCode::BAD_REQUEST, "Invalid code"),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(err) => {
                tracing::error!("Internal error: {:#}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::Unauthorized("Missing authorization token")
                .into_response()
                .status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Forbidden.into_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::Conflict.into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::InvalidCredentials.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::InvalidCode.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom"))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
