//! Event Entity
//!
//! An event record keyed by a caller-supplied id.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Event record stored in the registry
///
/// Participant and vendor lists keep insertion order and may contain
/// duplicates. `schedule` is an opaque descriptor and is never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    /// Caller-supplied unique key
    pub id: String,

    /// Display name
    pub name: String,

    /// Participant names, in insertion order
    #[serde(default)]
    pub participants: Vec<String>,

    /// Vendor names, in insertion order
    #[serde(default)]
    pub vendors: Vec<String>,

    /// Opaque scheduling descriptor (e.g. "Mon 09:00")
    pub schedule: String,
}

impl Event {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        schedule: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            participants: Vec::new(),
            vendors: Vec::new(),
            schedule: schedule.into(),
        }
    }

    pub fn with_participant(mut self, participant: impl Into<String>) -> Self {
        self.participants.push(participant.into());
        self
    }

    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendors.push(vendor.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}
