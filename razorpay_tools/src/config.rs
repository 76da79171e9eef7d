use gtr_common::Secret;
use log::*;

pub const DEFAULT_RAZORPAY_API_URL: &str = "https://api.razorpay.com/v1";

#[derive(Debug, Clone)]
pub struct RazorpayConfig {
    pub key_id: String,
    pub key_secret: Secret<String>,
    pub api_url: String,
}

impl Default for RazorpayConfig {
    fn default() -> Self {
        Self { key_id: String::default(), key_secret: Secret::default(), api_url: DEFAULT_RAZORPAY_API_URL.into() }
    }
}

impl RazorpayConfig {
    /// Builds the gateway configuration from the environment. Missing credentials log a warning and leave the
    /// client in a degraded mode where payment calls fail cleanly; the process still starts.
    pub fn new_from_env_or_default() -> Self {
        let key_id = std::env::var("RAZORPAY_KEY_ID").unwrap_or_else(|_| {
            warn!("🚨️ RAZORPAY_KEY_ID is not set. Payment orders cannot be created until it is configured.");
            String::new()
        });
        let key_secret = Secret::new(std::env::var("RAZORPAY_KEY_SECRET").unwrap_or_else(|_| {
            warn!("🚨️ RAZORPAY_KEY_SECRET is not set. Payment signatures cannot be verified until it is configured.");
            String::new()
        }));
        let api_url = std::env::var("RAZORPAY_API_URL").unwrap_or_else(|_| DEFAULT_RAZORPAY_API_URL.into());
        Self { key_id, key_secret, api_url }
    }

    pub fn has_credentials(&self) -> bool {
        !self.key_id.is_empty() && !self.key_secret.reveal().is_empty()
    }
}
