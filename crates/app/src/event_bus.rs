//! In-process event bus backed by a tokio broadcast channel.

use std::future::Future;

use tokio::sync::broadcast;

use catpoint_domain::error::CatpointError;
use catpoint_domain::event::Event;

use crate::ports::EventPublisher;

/// In-process notifier using a tokio [`broadcast`] channel.
///
/// Publishing succeeds even when nobody listens; the event is dropped.
/// Slow subscribers lose the oldest events once `capacity` is exceeded.
pub struct InProcessEventBus {
    sender: broadcast::Sender<Event>,
}

impl InProcessEventBus {
    /// Create a new event bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Receive every event published after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }
}

impl EventPublisher for InProcessEventBus {
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), CatpointError>> + Send {
        // only fails when there are no receivers
        let _ = self.sender.send(event);
        async { Ok(()) }
    }
}
