//! Authentication Models
//! Mission: Define user, role, and identity data structures

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String, // bcrypt hash - never serialize
    pub role: Role,
    pub is_verified: bool,
    pub created_at: String,
}

/// Closed set of roles. There is exactly one privileged role and no
/// hierarchy: admin does not implicitly satisfy anything else.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "admin")]
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// Identity resolved by the auth middleware and attached to the request.
/// Always re-read from the user store, never trusted from token claims,
/// so role changes apply without re-issuing tokens.
#[derive(Debug, Clone, Serialize)]
pub struct Identity {
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl Identity {
    /// Role gate: capability check against the set of roles a route
    /// accepts. Call sites stay unchanged if roles are added later.
    pub fn require_role(&self, allowed: &[Role]) -> Result<(), crate::api::error::ApiError> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(crate::api::error::ApiError::Forbidden)
        }
    }
}

/// Registration form body
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login form body (OAuth2-style password grant: username carries the email)
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Token response returned by register and login
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}
