//! Event Registry
//!
//! In-memory store of events keyed by id. One reader-writer lock covers
//! the whole map: `list` and `get` share it, every mutation takes it
//! exclusively. The lock is only held for the map operation itself and is
//! never held across an await point.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::domain::Event;
use crate::error::{PlatformError, Result};

/// What `create` does when the id is already taken
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Fail with a conflict and leave the stored event untouched
    #[default]
    Reject,
    /// Replace the stored event
    Overwrite,
}

impl FromStr for DuplicatePolicy {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "overwrite" => Ok(Self::Overwrite),
            other => Err(PlatformError::configuration(format!(
                "Invalid duplicate policy: {} (expected 'reject' or 'overwrite')",
                other
            ))),
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reject => f.write_str("reject"),
            Self::Overwrite => f.write_str("overwrite"),
        }
    }
}

/// Concurrency-safe event store
pub struct EventRegistry {
    events: RwLock<HashMap<String, Event>>,
    duplicate_policy: DuplicatePolicy,
}

impl Default for EventRegistry {
    fn default() -> Self {
        Self::new(DuplicatePolicy::default())
    }
}

impl EventRegistry {
    pub fn new(duplicate_policy: DuplicatePolicy) -> Self {
        Self {
            events: RwLock::new(HashMap::new()),
            duplicate_policy,
        }
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicate_policy
    }

    /// Store a new event under its own id
    pub fn create(&self, event: Event) -> Result<Event> {
        let mut events = self.events.write();

        if events.contains_key(&event.id) && self.duplicate_policy == DuplicatePolicy::Reject {
            return Err(PlatformError::duplicate("Event", "id", &event.id));
        }

        events.insert(event.id.clone(), event.clone());
        drop(events);

        debug!(event_id = %event.id, "Event created");
        Ok(event)
    }

    /// Snapshot of every stored event, in no particular order
    pub fn list(&self) -> Vec<Event> {
        self.events.read().values().cloned().collect()
    }

    pub fn get(&self, id: &str) -> Result<Event> {
        self.events
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| PlatformError::not_found("Event", id))
    }

    /// Insert or replace the event stored under `id`
    ///
    /// The payload's own id is ignored; the stored event always carries `id`.
    pub fn update(&self, id: &str, event: Event) -> Event {
        let event = event.with_id(id);
        let previous = self.events.write().insert(id.to_string(), event.clone());

        debug!(event_id = %id, inserted = previous.is_none(), "Event updated");
        event
    }

    /// Remove the event stored under `id`; absent ids are a no-op
    pub fn delete(&self, id: &str) {
        let removed = self.events.write().remove(id);
        debug!(event_id = %id, removed = removed.is_some(), "Event deleted");
    }

    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }
}
