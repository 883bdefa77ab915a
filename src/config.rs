//! Configuration for NetLearn
//!
//! CLI arguments and environment variable handling using clap.

use clap::Parser;
use std::time::Duration;

/// NetLearn - subscription-gated learning content core
#[derive(Parser, Debug, Clone)]
#[command(name = "netlearn")]
#[command(about = "Subscription-gated learning content core for the NetLearn platform")]
pub struct Args {
    /// Base URL of the hosted identity/row-store service
    #[arg(long, env = "NETLEARN_COLLABORATOR_URL", default_value = "http://localhost:54321")]
    pub collaborator_url: String,

    /// API key for the hosted service (required in production)
    #[arg(long, env = "NETLEARN_COLLABORATOR_KEY")]
    pub collaborator_key: Option<String>,

    /// Enable development mode (in-memory collaborator, no hosted service needed)
    #[arg(long, env = "DEV_MODE", default_value = "false")]
    pub dev_mode: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Simulated payment processor delay in milliseconds
    #[arg(long, env = "PAYMENT_DELAY_MS", default_value = "1500")]
    pub payment_delay_ms: u64,

    /// Request timeout for collaborator calls in milliseconds
    #[arg(long, env = "REQUEST_TIMEOUT_MS", default_value = "30000")]
    pub request_timeout_ms: u64,
}

impl Args {
    /// Simulated payment delay as a Duration
    pub fn payment_delay(&self) -> Duration {
        Duration::from_millis(self.payment_delay_ms)
    }

    /// Request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.dev_mode {
            if self.collaborator_key.is_none() {
                return Err("NETLEARN_COLLABORATOR_KEY is required outside dev mode".to_string());
            }
            if !self.collaborator_url.starts_with("http://")
                && !self.collaborator_url.starts_with("https://")
            {
                return Err("NETLEARN_COLLABORATOR_URL must be an http(s) URL".to_string());
            }
        }

        Ok(())
    }
}
