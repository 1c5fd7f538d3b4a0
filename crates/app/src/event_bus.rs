//! In-process event bus backed by a tokio broadcast channel.

use tokio::sync::broadcast;

use roikit_domain::error::RoikitError;
use roikit_domain::event::Event;

use crate::ports::EventPublisher;

/// Fans session changes out to every attached renderer.
///
/// Publishing succeeds with no renderer attached; the change is dropped.
/// Sending never blocks, so [`Session::dispatch`](crate::session::Session::dispatch)
/// can publish from its synchronous path. A renderer that falls more than
/// `capacity` changes behind sees [`broadcast::error::RecvError::Lagged`]
/// and should rebuild its view from scratch.
pub struct InProcessEventBus {
    sender: broadcast::Sender<Event>,
}

impl InProcessEventBus {
    /// Create a bus buffering up to `capacity` undelivered changes per renderer.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Attach a renderer. It receives only changes published afterwards.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }
}

impl EventPublisher for InProcessEventBus {
    fn publish(&self, event: Event) -> Result<(), RoikitError> {
        // Fails only when nobody is subscribed.
        let _ = self.sender.send(event);
        Ok(())
    }
}
