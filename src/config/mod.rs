//! Configuration handling for the application.
//!
//! All runtime configuration is collected into an immutable [`Config`] built
//! once at process start and passed by reference into the components that
//! need it (the fetch client, the server bind). Deep call paths never read
//! the environment themselves. `Config::from_env` performs the loading with
//! sensible development defaults.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::fetcher::types::TransportPolicy;

/// Environment variable names. Keeping them public lets tests and deploy
/// tooling refer to them.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_RELAY_BASE_URL: &str = "RELAY_BASE_URL";
pub const ENV_TRANSPORT_POLICY: &str = "TRANSPORT_POLICY";

/// Default development values used when environment variables are absent.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_RELAY_BASE_URL: &str = "https://api.allorigins.win/raw";

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    relay_base_url: String,
    transport_policy: TransportPolicy,
}

impl Config {
    /// Create a new config explicitly.
    pub fn new(
        bind_addr: impl Into<String>,
        relay_base_url: impl Into<String>,
        transport_policy: TransportPolicy,
    ) -> Self {
        Self {
            bind_addr: bind_addr.into(),
            relay_base_url: relay_base_url.into(),
            transport_policy,
        }
    }

    /// Load from environment variables, falling back to development defaults.
    ///
    /// Fails when `RELAY_BASE_URL` is not an absolute URL or when
    /// `TRANSPORT_POLICY` names an unknown policy.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let relay_base_url =
            env::var(ENV_RELAY_BASE_URL).unwrap_or_else(|_| DEFAULT_RELAY_BASE_URL.to_string());
        if let Err(e) = url::Url::parse(&relay_base_url) {
            return Err(ConfigError::InvalidValue {
                field: ENV_RELAY_BASE_URL,
                reason: e.to_string(),
            });
        }
        let transport_policy = match env::var(ENV_TRANSPORT_POLICY) {
            Ok(raw) => {
                TransportPolicy::parse(&raw).ok_or_else(|| ConfigError::InvalidValue {
                    field: ENV_TRANSPORT_POLICY,
                    reason: format!("unknown transport policy '{raw}'"),
                })?
            }
            Err(_) => TransportPolicy::default(),
        };
        Ok(Self {
            bind_addr,
            relay_base_url,
            transport_policy,
        })
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    /// Base URL of the pass-through relay used to bypass cross-origin
    /// restrictions. The target URL is appended as a `url` query parameter.
    pub fn relay_base_url(&self) -> &str {
        &self.relay_base_url
    }
    /// Transport order for article fetches, fixed at startup.
    pub fn transport_policy(&self) -> TransportPolicy {
        self.transport_policy
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}
