//! Router assembly and shared application state.

use crate::api::{auth_api, content_api, misc_api};
use crate::auth::{require_auth, JwtHandler, UserStore};
use crate::otp::OtpSender;
use crate::store::ContentStore;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared application state, constructed once at startup and injected
/// into every handler. There is no global store handle.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserStore>,
    pub content: Arc<ContentStore>,
    pub jwt: Arc<JwtHandler>,
    pub otp: Arc<dyn OtpSender>,
}

/// Build the full application router.
pub fn build_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/", get(misc_api::root))
        .route("/test", get(misc_api::test_database))
        .route("/auth/register", post(auth_api::register))
        .route("/auth/login", post(auth_api::login))
        .route("/auth/otp/start", post(auth_api::otp_start))
        .route("/auth/otp/verify", post(auth_api::otp_verify))
        .route("/packages", get(content_api::list_packages))
        .route("/blog", get(content_api::list_posts))
        .route("/testimonials", get(content_api::list_testimonials))
        .route("/lead", post(content_api::create_lead))
        .route("/appointment", post(content_api::create_appointment))
        .route("/contact", post(content_api::create_contact));

    // Everything here resolves an Identity first; admin-only handlers
    // additionally pass the role gate.
    let protected = Router::new()
        .route("/packages", post(content_api::create_package))
        .route("/blog", post(content_api::create_post))
        .route("/testimonials", post(content_api::create_testimonial))
        .route("/admin/leads", get(content_api::admin_leads))
        .route("/admin/appointments", get(content_api::admin_appointments))
        .route("/admin/contacts", get(content_api::admin_contacts))
        .route("/upload", post(misc_api::upload))
        .route("/payments/init", post(misc_api::payment_init))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
