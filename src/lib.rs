//! Saksham Backend Library
//!
//! Web backend for the Saksham Pravesh consulting/education site:
//! user registration and JWT auth, leads, appointments, contact messages,
//! package catalog, blog, testimonials, and admin-gated record views.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod otp;
pub mod store;

pub use api::routes::{build_router, AppState};
pub use config::Config;
