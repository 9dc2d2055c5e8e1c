//! Saksham Pravesh API server.
//!
//! Bootstrap only: environment, logging, storage, router, serve.
//! Storage that cannot be opened aborts startup instead of degrading
//! into per-request errors.

use anyhow::{Context, Result};
use dotenv::dotenv;
use saksham_backend::{
    auth::{JwtHandler, UserStore},
    build_router,
    otp::{DevOtpSender, OtpSender},
    store::ContentStore,
    AppState, Config,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenv();
    init_tracing();

    let config = Config::from_env();
    info!("Saksham Pravesh API starting");

    let users = Arc::new(UserStore::new(&config.auth_db_path)?);
    users.ensure_admin(&config.admin_email, &config.admin_password)?;
    let content = Arc::new(ContentStore::new(&config.database_path)?);
    info!(
        "Storage ready: auth={} content={}",
        config.auth_db_path, config.database_path
    );

    let jwt = Arc::new(JwtHandler::with_ttl_hours(
        config.jwt_secret.clone(),
        config.token_ttl_hours,
    ));
    let otp: Arc<dyn OtpSender> = Arc::new(DevOtpSender);

    let app = build_router(AppState {
        users,
        content,
        jwt,
        otp,
    });

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("API server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "saksham_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
