//! Caller Authentication
//!
//! Resolves who is asking for a token at `/login`. The token issuer trusts
//! whatever identity and role this returns.

use async_trait::async_trait;
use axum::http::HeaderMap;

use crate::domain::CallerIdentity;
use crate::error::{PlatformError, Result};

/// Resolves the identity and role of a login request
#[async_trait]
pub trait CallerAuthenticator: Send + Sync {
    async fn authenticate(&self, headers: &HeaderMap) -> Result<CallerIdentity>;
}

/// Authenticates every caller as one configured identity and role
///
/// Stands in for a real identity provider during development.
pub struct StaticCallerAuthenticator {
    caller: CallerIdentity,
}

impl StaticCallerAuthenticator {
    pub fn new(identity: impl Into<String>, role: impl Into<String>) -> Result<Self> {
        let caller = CallerIdentity::new(identity, role);
        if caller.identity.is_empty() || caller.role.is_empty() {
            return Err(PlatformError::configuration("login identity and role must be non-empty"));
        }
        Ok(Self { caller })
    }
}

#[async_trait]
impl CallerAuthenticator for StaticCallerAuthenticator {
    async fn authenticate(&self, _headers: &HeaderMap) -> Result<CallerIdentity> {
        Ok(self.caller.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_authenticator_returns_configured_caller() {
        let auth = StaticCallerAuthenticator::new("testuser", "organizer").unwrap();
        let caller = auth.authenticate(&HeaderMap::new()).await.unwrap();
        assert_eq!(caller, CallerIdentity::new("testuser", "organizer"));
    }

    #[test]
    fn test_static_authenticator_rejects_empty_values() {
        assert!(StaticCallerAuthenticator::new("", "organizer").is_err());
        assert!(StaticCallerAuthenticator::new("testuser", "").is_err());
    }
}
