//! Access Token Service
//!
//! Stateless HS256 access tokens:
//! - `TokenIssuer` mints a token for an identity/role valid for five minutes
//! - `AuthGate` verifies signature and expiry and yields a `Credential`
//!
//! Nothing is recorded server-side; every check is recomputed from the
//! token and the shared signing secret.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::domain::Credential;
use crate::error::{PlatformError, Result};

/// Lifetime of an access token, in seconds (fixed)
pub const TOKEN_TTL_SECS: i64 = 300;

/// Message returned for every rejected token, whatever check failed
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid token";

pub fn token_ttl() -> Duration {
    Duration::seconds(TOKEN_TTL_SECS)
}

/// Symmetric key shared by the issuer and the gate
#[derive(Clone)]
pub struct SigningSecret {
    bytes: Vec<u8>,
}

impl SigningSecret {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self { bytes: bytes.into() }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigningSecret([REDACTED])")
    }
}

/// Claims carried in the token payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Bearer identity
    pub username: String,
    /// Role label
    pub role: String,
    /// Expiry as unix seconds
    pub exp: i64,
}

/// A freshly minted token and its expiry
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Mints signed access tokens
pub struct TokenIssuer {
    secret: Arc<SigningSecret>,
}

impl TokenIssuer {
    pub fn new(secret: Arc<SigningSecret>) -> Self {
        Self { secret }
    }

    /// Issue a token for `identity`/`role` expiring five minutes from now
    pub fn issue(&self, identity: &str, role: &str) -> Result<IssuedToken> {
        self.issue_at(identity, role, Utc::now())
    }

    /// Issue a token as if the current time were `now`
    pub fn issue_at(&self, identity: &str, role: &str, now: DateTime<Utc>) -> Result<IssuedToken> {
        if self.secret.is_empty() {
            return Err(PlatformError::signing("signing secret is not configured"));
        }

        let exp = (now + token_ttl()).timestamp();
        let expires_at = DateTime::<Utc>::from_timestamp(exp, 0)
            .ok_or_else(|| PlatformError::signing("token expiry out of range"))?;

        let claims = AccessTokenClaims {
            username: identity.to_string(),
            role: role.to_string(),
            exp,
        };

        let key = EncodingKey::from_secret(self.secret.as_bytes());
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &key)
            .map_err(|e| PlatformError::signing(e.to_string()))?;

        debug!(identity = %identity, role = %role, expires_at = %expires_at, "Issued access token");

        Ok(IssuedToken { token, expires_at })
    }
}

/// Reason a token was rejected; logged, never returned to the caller
#[derive(Debug, Error)]
enum TokenRejection {
    #[error("signing secret is not configured")]
    MissingSecret,

    #[error("verification failed: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    #[error("token expired at {0}")]
    Expired(i64),

    #[error("token expiry out of range")]
    ExpiryOutOfRange,
}

/// Verifies access tokens
pub struct AuthGate {
    secret: Arc<SigningSecret>,
    validation: Validation,
}

impl AuthGate {
    pub fn new(secret: Arc<SigningSecret>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // exp is compared against the caller's clock in `authorize_at`
        validation.validate_exp = false;
        validation.leeway = 0;

        Self { secret, validation }
    }

    /// Verify `raw_token` against the current time
    pub fn authorize(&self, raw_token: &str) -> Result<Credential> {
        self.authorize_at(raw_token, Utc::now())
    }

    /// Verify `raw_token` as if the current time were `now`
    pub fn authorize_at(&self, raw_token: &str, now: DateTime<Utc>) -> Result<Credential> {
        self.verify(raw_token, now).map_err(|reason| {
            debug!(reason = %reason, "Access token rejected");
            PlatformError::unauthorized(INVALID_TOKEN_MESSAGE)
        })
    }

    fn verify(&self, raw_token: &str, now: DateTime<Utc>) -> std::result::Result<Credential, TokenRejection> {
        if self.secret.is_empty() {
            return Err(TokenRejection::MissingSecret);
        }

        let key = DecodingKey::from_secret(self.secret.as_bytes());
        let data = jsonwebtoken::decode::<AccessTokenClaims>(raw_token, &key, &self.validation)?;
        let claims = data.claims;

        // Valid strictly before exp
        if now.timestamp() >= claims.exp {
            return Err(TokenRejection::Expired(claims.exp));
        }

        let expires_at = DateTime::<Utc>::from_timestamp(claims.exp, 0)
            .ok_or(TokenRejection::ExpiryOutOfRange)?;

        Ok(Credential {
            identity: claims.username,
            role: claims.role,
            expires_at,
        })
    }
}

/// Extract the token from an Authorization header value
///
/// Accepts `Bearer <token>` and, for older clients, a bare token.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    let value = auth_header.trim_start();
    let token = match value.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        Some(_) => return None,
        None => value,
    };

    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &[u8] = b"test-secret-key-for-signing";

    fn secret(bytes: &[u8]) -> Arc<SigningSecret> {
        Arc::new(SigningSecret::new(bytes.to_vec()))
    }

    fn issuer_and_gate() -> (TokenIssuer, AuthGate) {
        let secret = secret(TEST_SECRET);
        (TokenIssuer::new(secret.clone()), AuthGate::new(secret))
    }

    #[test]
    fn test_issue_and_authorize() {
        let (issuer, gate) = issuer_and_gate();

        let issued = issuer.issue("alice", "organizer").unwrap();
        let credential = gate.authorize(&issued.token).unwrap();

        assert_eq!(credential.identity, "alice");
        assert_eq!(credential.role, "organizer");
        assert_eq!(credential.expires_at, issued.expires_at);
    }

    #[test]
    fn test_expiry_is_five_minutes() {
        let (issuer, _) = issuer_and_gate();
        let now = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();

        let issued = issuer.issue_at("alice", "organizer", now).unwrap();
        assert_eq!(issued.expires_at - now, Duration::minutes(5));
    }

    #[test]
    fn test_validity_window_boundary() {
        let (issuer, gate) = issuer_and_gate();
        let issued_at = Utc::now();
        let issued = issuer.issue_at("alice", "organizer", issued_at).unwrap();

        let just_before = issued_at + Duration::minutes(4) + Duration::seconds(59);
        assert!(gate.authorize_at(&issued.token, just_before).is_ok());

        let just_after = issued_at + Duration::minutes(5) + Duration::seconds(1);
        assert!(matches!(
            gate.authorize_at(&issued.token, just_after),
            Err(PlatformError::Unauthorized { .. })
        ));
    }

    #[test]
    fn test_rejected_exactly_at_expiry() {
        let (issuer, gate) = issuer_and_gate();
        let now = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        let issued = issuer.issue_at("alice", "organizer", now).unwrap();

        assert!(gate.authorize_at(&issued.token, issued.expires_at).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = TokenIssuer::new(secret(TEST_SECRET));
        let gate = AuthGate::new(secret(b"wrong-secret"));

        let issued = issuer.issue("alice", "organizer").unwrap();
        assert!(matches!(
            gate.authorize(&issued.token),
            Err(PlatformError::Unauthorized { .. })
        ));
    }

    #[test]
    fn test_single_bit_mutation_rejected() {
        let (issuer, gate) = issuer_and_gate();
        let issued = issuer.issue("alice", "organizer").unwrap();
        let original = issued.token.into_bytes();

        for index in 0..original.len() {
            for bit in 0..8 {
                let mut mutated = original.clone();
                mutated[index] ^= 1 << bit;

                // Non-UTF-8 input cannot be presented as a header value
                let Ok(candidate) = String::from_utf8(mutated) else {
                    continue;
                };

                assert!(
                    gate.authorize(&candidate).is_err(),
                    "mutation at byte {} bit {} was accepted",
                    index,
                    bit
                );
            }
        }
    }

    #[test]
    fn test_malformed_token_rejected_uniformly() {
        let (_, gate) = issuer_and_gate();

        for raw in ["", "not-a-token", "a.b", "a.b.c"] {
            match gate.authorize(raw) {
                Err(PlatformError::Unauthorized { message }) => {
                    assert_eq!(message, INVALID_TOKEN_MESSAGE)
                }
                other => panic!("expected unauthorized, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_other_algorithm_rejected() {
        let (_, gate) = issuer_and_gate();
        let claims = AccessTokenClaims {
            username: "mallory".to_string(),
            role: "organizer".to_string(),
            exp: (Utc::now() + token_ttl()).timestamp(),
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET),
        )
        .unwrap();

        assert!(gate.authorize(&token).is_err());
    }

    #[test]
    fn test_empty_secret_fails_signing() {
        let issuer = TokenIssuer::new(secret(b""));
        assert!(matches!(
            issuer.issue("alice", "organizer"),
            Err(PlatformError::Signing { .. })
        ));
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(extract_bearer_token("bearer abc"), Some("abc"));
        assert_eq!(extract_bearer_token("abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(extract_bearer_token("Basic dXNlcjpwYXNz"), None);
        assert_eq!(extract_bearer_token("Bearer "), None);
        assert_eq!(extract_bearer_token(""), None);
    }

    #[test]
    fn test_secret_debug_redacted() {
        let secret = SigningSecret::new(b"super-secret".to_vec());
        assert_eq!(format!("{:?}", secret), "SigningSecret([REDACTED])");
    }
}
