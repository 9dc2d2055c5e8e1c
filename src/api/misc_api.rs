//! Upload, payments, and diagnostics endpoints.

use crate::api::error::ApiError;
use crate::api::routes::AppState;
use crate::auth::models::Identity;
use crate::models::UploadRecord;
use axum::{
    extract::{Multipart, State},
    Extension, Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

/// GET / - liveness message
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Saksham Pravesh API running" }))
}

/// POST /upload (any authenticated identity, multipart)
///
/// Stores metadata and a synthesized URL only; file bytes are not
/// persisted. TODO: stream bytes to object storage once a bucket exists.
pub async fn upload(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let mut filename: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::BadRequest("Malformed multipart body"))?
    {
        if let Some(name) = field.file_name() {
            filename = Some(name.to_string());
            break;
        }
    }

    let filename = filename.ok_or(ApiError::BadRequest("No file in request"))?;

    let record = UploadRecord {
        user_email: Some(identity.email),
        filename: filename.clone(),
        url: format!("/uploads/{}", filename),
        purpose: None,
    };
    state.content.insert("upload", &record)?;

    info!("Stored upload metadata: {}", filename);
    Ok(Json(json!({ "url": record.url })))
}

#[derive(Debug, Deserialize)]
pub struct PaymentInit {
    pub package_slug: String,
}

/// POST /payments/init (any authenticated identity)
///
/// Mock order: the frontend creates the real order with the payment
/// provider; this backend only hands back a placeholder id.
pub async fn payment_init(
    Extension(identity): Extension<Identity>,
    Json(body): Json<PaymentInit>,
) -> Json<Value> {
    info!(
        "Payment init for {} (package {})",
        identity.email, body.package_slug
    );
    Json(json!({
        "order_id": format!("ORDER_{}", Utc::now().timestamp()),
        "amount": 0,
    }))
}

/// GET /test - store connectivity diagnostic
pub async fn test_database(State(state): State<AppState>) -> Json<Value> {
    match state.content.collections() {
        Ok(collections) => Json(json!({
            "backend": "running",
            "database": "connected",
            "collections": collections,
        })),
        Err(e) => Json(json!({
            "backend": "running",
            "database": format!("error: {}", e),
            "collections": [],
        })),
    }
}
