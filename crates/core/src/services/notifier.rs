use tokio::sync::broadcast;
use tracing::trace;

use crate::models::event::ChangeEvent;

/// Fan-out channel for committed writes.
///
/// Views subscribe once and drop cached aggregates when an event for their
/// user arrives. A lagging subscriber loses the oldest events and sees
/// `RecvError::Lagged`, which it should treat as "refresh everything".
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    sender: broadcast::Sender<ChangeEvent>,
}

impl ChangeNotifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }

    /// Returns how many subscribers received the event. Zero is not an error.
    pub fn publish(&self, event: ChangeEvent) -> usize {
        trace!(?event, "publishing change");
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new(64)
    }
}
