//! Event bus abstraction for forwarding observer notifications.
//!
//! Lets the secure-desktop signal leave the process-local [`Action`] channel
//! (to a UI shell, an IPC pipe, a test recorder) without those sinks having to
//! register typed handlers.

use crate::action::{Action, HandlerId};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Sink for topic-tagged JSON events.
pub trait EventBus: Send + Sync {
    /// Emit an event with a JSON payload.
    ///
    /// # Arguments
    /// * `topic` - Event name/topic (e.g., "desktop:secure_state_changed")
    /// * `payload` - JSON payload to emit
    fn emit(&self, topic: &str, payload: serde_json::Value);
}

/// Type alias for shared event bus reference.
pub type EventBusRef = Arc<dyn EventBus>;

/// A captured event from InMemoryEventBus.
#[derive(Debug, Clone, PartialEq)]
pub struct EmittedEvent {
    pub topic: String,
    pub payload: serde_json::Value,
}

/// In-memory event bus that records every emitted event.
#[derive(Default)]
pub struct InMemoryEventBus {
    events: Mutex<Vec<EmittedEvent>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all captured events.
    pub fn events(&self) -> Vec<EmittedEvent> {
        self.lock().clone()
    }

    /// Get events for a specific topic.
    pub fn events_for(&self, topic: &str) -> Vec<EmittedEvent> {
        self.lock()
            .iter()
            .filter(|e| e.topic == topic)
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<EmittedEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EventBus for InMemoryEventBus {
    fn emit(&self, topic: &str, payload: serde_json::Value) {
        self.lock().push(EmittedEvent {
            topic: topic.to_string(),
            payload,
        });
    }
}

/// No-op event bus that discards all events.
pub struct NullEventBus;

impl EventBus for NullEventBus {
    fn emit(&self, _topic: &str, _payload: serde_json::Value) {}
}

/// Forward every notification on `channel` to `bus` under `topic`.
///
/// Returns the registration id so the bridge can be torn down with
/// [`Action::unregister`].
pub fn bridge_to_bus<T>(channel: &Action<T>, topic: &'static str, bus: EventBusRef) -> HandlerId
where
    T: Serialize + 'static,
{
    channel.register(Arc::new(move |payload: &T| {
        match serde_json::to_value(payload) {
            Ok(value) => bus.emit(topic, value),
            Err(e) => tracing::warn!(topic, error = %e, "failed to serialize event"),
        }
    }))
}
