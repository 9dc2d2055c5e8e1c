//! OTP Delivery
//! Mission: Pluggable one-time-passcode delivery behind a capability trait
//!
//! The handler never knows how a code reaches the user. Swapping in a real
//! SMS/email provider is a configuration change, not a handler change.

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

/// The fixed code issued while the system runs with the dev sender.
/// Explicitly a development stand-in, not production-safe.
pub const DEV_OTP_CODE: &str = "123456";

/// Produce a fresh code for an OTP request. Currently the fixed dev code;
/// a real-provider deployment generates a random one here.
pub fn generate_code() -> String {
    DEV_OTP_CODE.to_string()
}

/// Delivery capability: send `code` to `target` over `channel`.
#[async_trait]
pub trait OtpSender: Send + Sync {
    /// Returns an optional dev echo to include in the API response.
    /// Real providers return `None`; the code must only travel out of band.
    async fn send(&self, channel: &str, target: &str, code: &str) -> Result<Option<String>>;
}

/// Development sender: logs the code and echoes it back in the response.
pub struct DevOtpSender;

#[async_trait]
impl OtpSender for DevOtpSender {
    async fn send(&self, channel: &str, target: &str, code: &str) -> Result<Option<String>> {
        info!("DEV OTP for {} via {}: {}", target, channel, code);
        Ok(Some(code.to_string()))
    }
}
