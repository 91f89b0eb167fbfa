//! Credential and Role Types
//!
//! A credential is the verified content of an access token. It lives for
//! the duration of a single request and is never stored.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;

/// Role labels understood by the platform
///
/// The role carried by a token is an open set of strings; anything not
/// listed here classifies as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Organizer,
    Participant,
    Vendor,
    Unknown,
}

impl Role {
    pub fn from_label(label: &str) -> Self {
        match label {
            "organizer" => Self::Organizer,
            "participant" => Self::Participant,
            "vendor" => Self::Vendor,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Organizer => "organizer",
            Self::Participant => "participant",
            Self::Vendor => "vendor",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verified identity and role of a token bearer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    /// Bearer's name or ID
    pub identity: String,

    /// Raw role label as issued
    pub role: String,

    /// Instant after which the token is no longer accepted
    pub expires_at: DateTime<Utc>,
}

impl Credential {
    /// Classified role
    pub fn role_kind(&self) -> Role {
        Role::from_label(&self.role)
    }
}

/// Identity and role resolved for a caller asking to log in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub identity: String,
    pub role: String,
}

impl CallerIdentity {
    pub fn new(identity: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            role: role.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_label() {
        assert_eq!(Role::from_label("organizer"), Role::Organizer);
        assert_eq!(Role::from_label("participant"), Role::Participant);
        assert_eq!(Role::from_label("vendor"), Role::Vendor);
        assert_eq!(Role::from_label("admin"), Role::Unknown);
        assert_eq!(Role::from_label("Organizer"), Role::Unknown);
    }

    #[test]
    fn test_credential_keeps_raw_role() {
        let credential = Credential {
            identity: "alice".to_string(),
            role: "sponsor".to_string(),
            expires_at: Utc::now(),
        };
        assert_eq!(credential.role, "sponsor");
        assert_eq!(credential.role_kind(), Role::Unknown);
    }
}
