//! Common API types and utilities

use axum::extract::rejection::JsonRejection;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::PlatformError;

/// Standard API error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiError {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// How much of a body decoding failure is echoed back to the client
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorVerbosity {
    /// Include the decoder's message
    #[default]
    Detailed,
    /// Fixed generic message
    Generic,
}

impl ErrorVerbosity {
    pub fn from_flag(verbose: bool) -> Self {
        if verbose {
            Self::Detailed
        } else {
            Self::Generic
        }
    }

    /// Map a JSON body rejection to a 400 validation error
    pub fn malformed_body(&self, rejection: JsonRejection) -> PlatformError {
        match self {
            Self::Detailed => PlatformError::validation(rejection.body_text()),
            Self::Generic => PlatformError::validation("Malformed request body"),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status: UP
    pub status: String,
    /// Application version
    pub version: String,
}
