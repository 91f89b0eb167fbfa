//! Domain Models
//!
//! Core domain entities: event records held by the registry and the
//! credentials carried by signed access tokens.

pub mod event;
pub mod credential;

pub use event::*;
pub use credential::*;
