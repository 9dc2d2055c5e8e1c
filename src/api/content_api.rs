//! Content Endpoints
//! Mission: Public catalog/blog/forms plus admin-gated record views

use crate::api::error::ApiError;
use crate::api::routes::AppState;
use crate::auth::models::{Identity, Role};
use crate::models::{Appointment, BlogPost, ContactMessage, Lead, Package, Testimonial};
use axum::{extract::State, Extension, Json};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::warn;

/// Decode listed documents into their typed shape, skipping any record
/// that no longer matches the current schema.
fn decode_all<T: DeserializeOwned>(collection: &str, docs: Vec<Value>) -> Vec<T> {
    docs.into_iter()
        .filter_map(|doc| match serde_json::from_value(doc) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!("Skipping malformed {} document: {}", collection, e);
                None
            }
        })
        .collect()
}

// ===== Public catalog =====

/// GET /packages
pub async fn list_packages(
    State(state): State<AppState>,
) -> Result<Json<Vec<Package>>, ApiError> {
    let docs = state.content.list("package")?;
    Ok(Json(decode_all("package", docs)))
}

/// POST /packages (admin)
pub async fn create_package(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(pkg): Json<Package>,
) -> Result<Json<Value>, ApiError> {
    identity.require_role(&[Role::Admin])?;
    state.content.insert("package", &pkg)?;
    Ok(Json(json!({ "ok": true })))
}

/// GET /blog
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<BlogPost>>, ApiError> {
    let docs = state.content.list("blogpost")?;
    Ok(Json(decode_all("blogpost", docs)))
}

/// POST /blog (admin)
pub async fn create_post(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(post): Json<BlogPost>,
) -> Result<Json<Value>, ApiError> {
    identity.require_role(&[Role::Admin])?;
    state.content.insert("blogpost", &post)?;
    Ok(Json(json!({ "ok": true })))
}

/// GET /testimonials
pub async fn list_testimonials(
    State(state): State<AppState>,
) -> Result<Json<Vec<Testimonial>>, ApiError> {
    let docs = state.content.list("testimonial")?;
    Ok(Json(decode_all("testimonial", docs)))
}

/// POST /testimonials (admin)
pub async fn create_testimonial(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(testimonial): Json<Testimonial>,
) -> Result<Json<Value>, ApiError> {
    identity.require_role(&[Role::Admin])?;
    state.content.insert("testimonial", &testimonial)?;
    Ok(Json(json!({ "ok": true })))
}

// ===== Public forms =====

/// POST /lead
pub async fn create_lead(
    State(state): State<AppState>,
    Json(lead): Json<Lead>,
) -> Result<Json<Value>, ApiError> {
    state.content.insert("lead", &lead)?;
    Ok(Json(json!({ "ok": true })))
}

/// POST /appointment
pub async fn create_appointment(
    State(state): State<AppState>,
    Json(appt): Json<Appointment>,
) -> Result<Json<Value>, ApiError> {
    state.content.insert("appointment", &appt)?;
    Ok(Json(json!({ "ok": true })))
}

/// POST /contact
pub async fn create_contact(
    State(state): State<AppState>,
    Json(msg): Json<ContactMessage>,
) -> Result<Json<Value>, ApiError> {
    state.content.insert("contactmessage", &msg)?;
    Ok(Json(json!({ "ok": true })))
}

// ===== Admin record views =====
// Raw stored records, store order, no pagination.

/// GET /admin/leads (admin)
pub async fn admin_leads(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<Value>>, ApiError> {
    identity.require_role(&[Role::Admin])?;
    Ok(Json(state.content.list("lead")?))
}

/// GET /admin/appointments (admin)
pub async fn admin_appointments(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<Value>>, ApiError> {
    identity.require_role(&[Role::Admin])?;
    Ok(Json(state.content.list("appointment")?))
}

/// GET /admin/contacts (admin)
pub async fn admin_contacts(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<Value>>, ApiError> {
    identity.require_role(&[Role::Admin])?;
    Ok(Json(state.content.list("contactmessage")?))
}
