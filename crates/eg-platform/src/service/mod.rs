//! Service Layer
//!
//! Token issuance and verification, caller authentication, and the event
//! registry.

pub mod auth;
pub mod caller;
pub mod registry;

pub use auth::{
    AuthGate, TokenIssuer, SigningSecret, IssuedToken, AccessTokenClaims,
    extract_bearer_token, TOKEN_TTL_SECS, INVALID_TOKEN_MESSAGE,
};
pub use caller::{CallerAuthenticator, StaticCallerAuthenticator};
pub use registry::{EventRegistry, DuplicatePolicy};
