//! Authentication Middleware
//! Mission: Gate protected routes behind bearer-token identity resolution

use crate::api::error::ApiError;
use crate::api::routes::AppState;
use crate::auth::jwt::TokenError;
use crate::auth::models::Identity;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

/// Validates the bearer token, re-resolves the subject against the user
/// store, and attaches an `Identity` to the request extensions.
///
/// The store lookup per request (rather than trusting token claims for
/// role) is deliberate: role changes take effect immediately without
/// re-issuing tokens, and a token that outlives its account stops working.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .ok_or(ApiError::Unauthorized("Missing authorization token"))?;

    let claims = state.jwt.verify(token).map_err(|e| match e {
        TokenError::Expired => ApiError::Unauthorized("Token expired"),
        TokenError::Malformed | TokenError::MissingSubject => {
            ApiError::Unauthorized("Invalid token")
        }
    })?;

    let user = state
        .users
        .find_by_email(&claims.sub)?
        .ok_or(ApiError::Unauthorized("User not found"))?;

    req.extensions_mut().insert(Identity {
        email: user.email,
        name: user.name,
        role: user.role,
    });

    Ok(next.run(req).await)
}
