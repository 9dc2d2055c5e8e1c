//! HTTP API
//! Mission: Thin handlers mapping verb+path to one store operation

pub mod auth_api;
pub mod content_api;
pub mod error;
pub mod misc_api;
pub mod routes;
