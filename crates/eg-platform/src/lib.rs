//! EventGate Platform
//!
//! Core platform providing:
//! - Short-lived signed access tokens carrying an identity and role
//! - An auth gate that verifies tokens and propagates the credential
//! - A concurrency-safe in-memory event registry
//! - REST APIs over both

pub mod domain;
pub mod service;
pub mod api;
pub mod config;
pub mod error;

pub use domain::*;
pub use error::PlatformError;
pub use config::ServerConfig;
pub use api::create_router;
