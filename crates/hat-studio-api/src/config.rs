//! Server configuration from environment variables

use hat_codegen::{GeneratorConfig, Quoting};
use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_RUNTIME_URL: &str = "http://localhost:8080";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An environment variable holds an unusable value
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to (`HAT_STUDIO_ADDR`)
    pub addr: SocketAddr,
    /// Base URL of the Hat runtime (`HAT_RUNTIME_URL`)
    pub runtime_url: Url,
    /// Code generator settings (`HAT_STRING_QUOTING`)
    pub generator: GeneratorConfig,
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// unset variables
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let addr = lookup("HAT_STUDIO_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue {
                key: "HAT_STUDIO_ADDR",
                reason: e.to_string(),
            })?;

        let runtime_url =
            lookup("HAT_RUNTIME_URL").unwrap_or_else(|| DEFAULT_RUNTIME_URL.to_string());
        let runtime_url = Url::parse(&runtime_url).map_err(|e| ConfigError::InvalidValue {
            key: "HAT_RUNTIME_URL",
            reason: e.to_string(),
        })?;

        let quoting = match lookup("HAT_STRING_QUOTING").as_deref() {
            None | Some("verbatim") => Quoting::Verbatim,
            Some("escaped") => Quoting::Escaped,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    key: "HAT_STRING_QUOTING",
                    reason: format!("expected \"verbatim\" or \"escaped\", got {other:?}"),
                })
            }
        };

        Ok(Self {
            addr,
            runtime_url,
            generator: GeneratorConfig { quoting },
        })
    }
}
