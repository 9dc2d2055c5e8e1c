//! Process configuration, read once at startup.
//!
//! Storage that cannot be opened is fatal at startup; there are no
//! per-request "database not configured" checks anywhere downstream.

use tracing::warn;

const DEV_JWT_SECRET: &str = "dev-secret-change-in-production-minimum-32-characters";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_path: String,
    pub auth_db_path: String,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub admin_email: String,
    pub admin_password: String,
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .unwrap_or(8000);

        let database_path =
            std::env::var("DATABASE_PATH").unwrap_or_else(|_| "./saksham.db".to_string());

        let auth_db_path =
            std::env::var("AUTH_DB_PATH").unwrap_or_else(|_| "./saksham_auth.db".to_string());

        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            warn!("JWT_SECRET not set - using development secret");
            DEV_JWT_SECRET.to_string()
        });

        let token_ttl_hours = std::env::var("TOKEN_TTL_HOURS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|&v| v > 0)
            .unwrap_or(24);

        let admin_email =
            std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@saksham.local".to_string());

        let admin_password =
            std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());

        Self {
            port,
            database_path,
            auth_db_path,
            jwt_secret,
            token_ttl_hours,
            admin_email,
            admin_password,
        }
    }
}
