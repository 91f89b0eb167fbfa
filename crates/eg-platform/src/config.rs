//! Server Configuration
//!
//! Loaded once at startup. Any error here is fatal: the server must not
//! accept traffic without a signing secret.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `EG_SECRET_KEY` / `SECRET_KEY` | - | Token signing secret (required) |
//! | `EG_API_PORT` / `PORT` | `8080` | HTTP API port |
//! | `EG_BIND_ADDR` | `0.0.0.0` | HTTP bind address |
//! | `EG_DUPLICATE_POLICY` | `reject` | `reject` or `overwrite` on duplicate event ids |
//! | `EG_VERBOSE_ERRORS` | `true` | Echo body decoding errors to clients |
//! | `EG_LOGIN_IDENTITY` | `testuser` | Identity minted by `/login` |
//! | `EG_LOGIN_ROLE` | `organizer` | Role minted by `/login` |

use crate::api::common::ErrorVerbosity;
use crate::error::{PlatformError, Result};
use crate::service::{DuplicatePolicy, SigningSecret};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
pub const DEFAULT_LOGIN_IDENTITY: &str = "testuser";
pub const DEFAULT_LOGIN_ROLE: &str = "organizer";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
    pub signing_secret: SigningSecret,
    pub duplicate_policy: DuplicatePolicy,
    pub error_verbosity: ErrorVerbosity,
    pub login_identity: String,
    pub login_role: String,
}

impl ServerConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |keys: &[&str]| keys.iter().find_map(|key| lookup(*key));

        let secret = first(&["EG_SECRET_KEY", "SECRET_KEY"])
            .filter(|s| !s.is_empty())
            .ok_or_else(|| PlatformError::configuration("EG_SECRET_KEY (or SECRET_KEY) must be set"))?;

        let port = match first(&["EG_API_PORT", "PORT"]).filter(|p| !p.is_empty()) {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| PlatformError::configuration(format!("Invalid port '{}': {}", raw, e)))?,
            None => DEFAULT_PORT,
        };

        let duplicate_policy = match lookup("EG_DUPLICATE_POLICY") {
            Some(raw) => raw.parse()?,
            None => DuplicatePolicy::default(),
        };

        let error_verbosity = match lookup("EG_VERBOSE_ERRORS") {
            Some(raw) => ErrorVerbosity::from_flag(parse_flag(&raw)?),
            None => ErrorVerbosity::default(),
        };

        Ok(Self {
            bind_addr: lookup("EG_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            port,
            signing_secret: SigningSecret::new(secret.into_bytes()),
            duplicate_policy,
            error_verbosity,
            login_identity: lookup("EG_LOGIN_IDENTITY").unwrap_or_else(|| DEFAULT_LOGIN_IDENTITY.to_string()),
            login_role: lookup("EG_LOGIN_ROLE").unwrap_or_else(|| DEFAULT_LOGIN_ROLE.to_string()),
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(PlatformError::configuration(format!("Invalid boolean: {}", other))),
    }
}
