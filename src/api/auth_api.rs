//! Authentication Endpoints
//! Mission: Registration, credentials login, and the dev OTP flow

use crate::api::error::ApiError;
use crate::api::routes::AppState;
use crate::auth::models::{LoginForm, RegisterForm, Role, TokenResponse};
use crate::auth::password;
use crate::auth::user_store;
use crate::models::OtpRequest;
use axum::{extract::State, http::StatusCode, Form, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};

const OTP_TTL_MINUTES: i64 = 10;

/// POST /auth/register (form: name, email, password)
///
/// The duplicate pre-check gives the friendly 409; the store's unique
/// index is the atomic backstop for the check-then-insert race, and a
/// violation there maps to the same 409.
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    if state.users.find_by_email(&form.email)?.is_some() {
        return Err(ApiError::Conflict);
    }

    let password_hash = password::hash_password(&form.password)?;
    state
        .users
        .create(&form.name, &form.email, None, &password_hash, Role::User)
        .map_err(|e| {
            if user_store::is_unique_violation(&e) {
                ApiError::Conflict
            } else {
                ApiError::Internal(e)
            }
        })?;

    let (token, _) = state.jwt.issue(&form.email)?;
    info!("Registered user: {}", form.email);

    Ok((StatusCode::CREATED, Json(TokenResponse::bearer(token))))
}

/// POST /auth/login (form: username=email, password)
///
/// Unknown email and wrong password share one error shape so responses
/// don't reveal which emails have accounts.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = state
        .users
        .find_by_email(&form.username)?
        .ok_or(ApiError::InvalidCredentials)?;

    if !password::verify_password(&form.password, &user.password_hash) {
        warn!("Failed login attempt: {}", form.username);
        return Err(ApiError::InvalidCredentials);
    }

    let (token, _) = state.jwt.issue(&user.email)?;
    info!("Login successful: {} ({})", user.email, user.role.as_str());

    Ok(Json(TokenResponse::bearer(token)))
}

#[derive(Debug, Deserialize)]
pub struct OtpStartRequest {
    pub channel: String,
    pub target: String,
    pub purpose: String,
}

#[derive(Debug, Serialize)]
pub struct OtpStartResponse {
    pub sent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_code: Option<String>,
}

/// POST /auth/otp/start
pub async fn otp_start(
    State(state): State<AppState>,
    Json(body): Json<OtpStartRequest>,
) -> Result<Json<OtpStartResponse>, ApiError> {
    let code = crate::otp::generate_code();
    let dev_code = state.otp.send(&body.channel, &body.target, &code).await?;

    let record = OtpRequest {
        channel: body.channel,
        target: body.target,
        code,
        purpose: body.purpose,
        expires_at: Utc::now() + chrono::Duration::minutes(OTP_TTL_MINUTES),
        verified: false,
    };
    state.content.insert("otprequest", &record)?;

    Ok(Json(OtpStartResponse {
        sent: true,
        dev_code,
    }))
}

#[derive(Debug, Deserialize)]
pub struct OtpVerifyRequest {
    pub target: String,
    pub code: String,
    pub purpose: String,
}

/// POST /auth/otp/verify
///
/// A match past its expiry is rejected like a mismatch, and a successful
/// match is marked verified.
pub async fn otp_verify(
    State(state): State<AppState>,
    Json(body): Json<OtpVerifyRequest>,
) -> Result<Json<Value>, ApiError> {
    let (id, doc) = state
        .content
        .find_match(
            "otprequest",
            &[
                ("target", &body.target),
                ("code", &body.code),
                ("purpose", &body.purpose),
            ],
        )?
        .ok_or(ApiError::InvalidCode)?;

    let record: OtpRequest =
        serde_json::from_value(doc).map_err(|e| ApiError::Internal(e.into()))?;
    if record.expires_at < Utc::now() {
        return Err(ApiError::InvalidCode);
    }

    state.content.set_bool(&id, "verified", true)?;

    Ok(Json(json!({ "verified": true })))
}
