use std::env;

use gtr_common::helpers::parse_boolean_flag;
use log::*;
use razorpay_tools::RazorpayConfig;

const DEFAULT_GTR_HOST: &str = "127.0.0.1";
const DEFAULT_GTR_PORT: u16 = 8360;
const DEFAULT_GTR_DATABASE_URL: &str = "sqlite://data/gtr_motors.db";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// When set, an empty store is loaded with the built-in seed catalog at startup.
    pub seed_on_startup: bool,
    /// Payment gateway credentials. Missing credentials leave the server in a degraded mode where payment
    /// calls fail cleanly, rather than stopping it from starting.
    pub razorpay: RazorpayConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_GTR_HOST.to_string(),
            port: DEFAULT_GTR_PORT,
            database_url: DEFAULT_GTR_DATABASE_URL.to_string(),
            seed_on_startup: true,
            razorpay: RazorpayConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("GTR_HOST").ok().unwrap_or_else(|| DEFAULT_GTR_HOST.into());
        let port = env::var("GTR_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for GTR_PORT. {e} Using the default, {DEFAULT_GTR_PORT}, instead."
                    );
                    DEFAULT_GTR_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_GTR_PORT);
        let database_url = env::var("GTR_DATABASE_URL").ok().unwrap_or_else(|| {
            warn!("🪛️ GTR_DATABASE_URL is not set. Using the default, {DEFAULT_GTR_DATABASE_URL}, instead.");
            DEFAULT_GTR_DATABASE_URL.to_string()
        });
        let seed_on_startup = parse_boolean_flag(env::var("GTR_SEED_ON_STARTUP").ok(), true);
        let razorpay = RazorpayConfig::new_from_env_or_default();
        Self { host, port, database_url, seed_on_startup, razorpay }
    }
}
