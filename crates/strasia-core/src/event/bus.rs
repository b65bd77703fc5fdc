//! Broadcast event bus for distributing `SessionEvent` to renderers.
//!
//! Built on `tokio::sync::broadcast`, the `EventBus` supports multiple
//! concurrent subscribers. Publishing with no active subscribers is a no-op.

use strasia_types::event::SessionEvent;
use tokio::sync::broadcast;

/// Default channel capacity; a single session produces a handful of events per turn.
pub const DEFAULT_CAPACITY: usize = 256;

/// Multi-consumer event bus for session change events.
///
/// Cloning the bus clones the sender, so the controller and a shared handle
/// can publish and subscribe through the same channel.
pub struct EventBus {
    sender: broadcast::Sender<SessionEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Create a new subscriber that will receive all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no subscribers, the event is silently dropped.
    pub fn publish(&self, event: SessionEvent) {
        let _ = self.sender.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("receiver_count", &self.sender.receiver_count())
            .finish()
    }
}
