//! JWT Token Handler
//! Mission: Issue and verify signed, time-limited bearer tokens

use anyhow::{Context, Result};
use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// JWT claims payload. Deliberately minimal: the subject email and the
/// expiry. Role is re-resolved from the user store on every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub sub: String,
    pub exp: usize,
}

/// Why a token was rejected. Every variant maps to an unauthorized
/// outcome at the HTTP boundary; none is ever treated as anonymous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    Expired,
    Malformed,
    MissingSubject,
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenError::Expired => write!(f, "Token expired"),
            TokenError::Malformed => write!(f, "Invalid token"),
            TokenError::MissingSubject => write!(f, "Token has no subject"),
        }
    }
}

impl std::error::Error for TokenError {}

/// Stateless HS256 token issuer/verifier keyed by a shared secret.
pub struct JwtHandler {
    secret: String,
    expiration_hours: i64,
}

impl JwtHandler {
    /// Create a handler with the default 24-hour token lifetime.
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            expiration_hours: 24,
        }
    }

    /// Create a handler with an explicit token lifetime in hours.
    pub fn with_ttl_hours(secret: String, hours: i64) -> Self {
        Self {
            secret,
            expiration_hours: hours,
        }
    }

    /// Issue a token for the given subject email.
    /// Returns the token and its lifetime in seconds.
    pub fn issue(&self, email: &str) -> Result<(String, usize)> {
        let expiration = Utc::now()
            .checked_add_signed(chrono::Duration::hours(self.expiration_hours))
            .context("Invalid timestamp")?
            .timestamp() as usize;

        let expires_in = (self.expiration_hours * 3600) as usize;

        let claims = Claims {
            sub: email.to_string(),
            exp: expiration,
        };

        debug!(
            "Issuing JWT for {}, expires in {}h",
            email, self.expiration_hours
        );

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .context("Failed to sign JWT")?;

        Ok((token, expires_in))
    }

    /// Verify a token and extract its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::default();
        // No expiry leeway: a token one second past exp is expired.
        validation.leeway = 0;

        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed,
        })?;

        if decoded.claims.sub.is_empty() {
            return Err(TokenError::MissingSubject);
        }

        Ok(decoded.claims)
    }
}
