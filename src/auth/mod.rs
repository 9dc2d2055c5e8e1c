//! Authentication Module
//! Mission: Secure API access with JWT tokens and role-gated routes

pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod user_store;

pub use jwt::{Claims, JwtHandler, TokenError};
pub use middleware::require_auth;
pub use models::{Identity, Role, User};
pub use user_store::UserStore;
